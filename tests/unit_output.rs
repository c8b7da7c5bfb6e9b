// Unit tests for the document-topic table and its styling.

use ndarray::{array, Array2};
use poem_topics::output::style::EMPHASIS_THRESHOLD;
use poem_topics::output::table::round_to;
use poem_topics::output::{
    cell_style, lda_output_to_dataframe, print_doc_topic_distribution, CellColor,
};

// ============================================================
// lda_output_to_dataframe
// ============================================================

#[test]
fn dominant_topic_ties_pick_lowest_index() {
    let table = lda_output_to_dataframe(&array![[0.7, 0.7, 0.1], [0.1, 0.2, 0.7]]);
    assert_eq!(table.dominant_topic, vec![0, 2]);
}

#[test]
fn dominant_topic_is_row_argmax() {
    let lda_output = array![
        [0.05, 0.15, 0.80],
        [0.40, 0.35, 0.25],
        [0.33333, 0.33334, 0.33333],
    ];
    let table = lda_output_to_dataframe(&lda_output);
    for (i, row) in table.values.outer_iter().enumerate() {
        let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let first = row.iter().position(|&v| v == max).unwrap();
        assert_eq!(table.dominant_topic[i], first);
    }
    assert_eq!(table.dominant_topic, vec![2, 0, 1]);
}

#[test]
fn rounding_is_idempotent() {
    let lda_output = array![
        [0.123456789, 0.876543211],
        [0.000004999, 0.999995001],
        [1.0 / 3.0, 2.0 / 3.0],
    ];
    let table = lda_output_to_dataframe(&lda_output);
    let rerounded = table.values.mapv(|v| round_to(v, 5));
    assert_eq!(rerounded, table.values);

    let again = lda_output_to_dataframe(&table.values);
    assert_eq!(again.values, table.values);
    assert_eq!(again.dominant_topic, table.dominant_topic);
}

#[test]
fn labels_match_shape() {
    let table = lda_output_to_dataframe(&Array2::from_elem((4, 3), 1.0 / 3.0));
    assert_eq!(table.doc_names, vec!["Doc0", "Doc1", "Doc2", "Doc3"]);
    assert_eq!(
        table.columns(),
        vec!["Topic0", "Topic1", "Topic2", "dominant_topic"]
    );
}

#[test]
fn empty_matrix_gives_empty_table() {
    let table = lda_output_to_dataframe(&Array2::<f64>::zeros((0, 2)));
    assert_eq!(table.num_docs(), 0);
    assert_eq!(table.num_topics(), 2);
    assert!(table.dominant_topic.is_empty());
}

// ============================================================
// print_doc_topic_distribution
// ============================================================

#[test]
fn max_docs_one_returns_first_row_unchanged() {
    let table = lda_output_to_dataframe(&array![
        [0.6, 0.3, 0.1],
        [0.2, 0.5, 0.3],
        [0.1, 0.1, 0.8],
    ]);
    let styled = print_doc_topic_distribution(&table, 1);

    assert_eq!(styled.table.num_docs(), 1);
    assert_eq!(styled.table.row(0), table.row(0));
    assert_eq!(styled.table.dominant_topic, vec![0]);
}

#[test]
fn styling_does_not_change_values() {
    let table = lda_output_to_dataframe(&array![[0.05, 0.95], [0.5, 0.5]]);
    let styled = print_doc_topic_distribution(&table, 10);
    assert_eq!(styled.table, table);
}

#[test]
fn styles_follow_threshold() {
    let table = lda_output_to_dataframe(&array![[0.05, 0.1, 0.85]]);
    let styled = print_doc_topic_distribution(&table, 1);

    assert_eq!(styled.style(0, 0).unwrap().color, CellColor::Black);
    assert_eq!(styled.style(0, 1).unwrap().color, CellColor::Black);
    assert_eq!(styled.style(0, 2).unwrap().color, CellColor::Green);
    assert_eq!(styled.style(0, 2).unwrap().font_weight, 700);
    // dominant_topic = 2 is numeric and above the threshold
    assert_eq!(styled.style(0, 3).unwrap().color, CellColor::Green);
}

#[test]
fn cell_style_boundary() {
    assert_eq!(cell_style(EMPHASIS_THRESHOLD).color, CellColor::Black);
    assert_eq!(cell_style(EMPHASIS_THRESHOLD + 1e-9).color, CellColor::Green);
    assert_eq!(cell_style(-1.0).font_weight, 400);
}

#[test]
fn html_has_one_row_per_doc() {
    let table = lda_output_to_dataframe(&array![[0.6, 0.4], [0.3, 0.7], [0.5, 0.5]]);
    let html = print_doc_topic_distribution(&table, 2).to_html();
    assert_eq!(html.matches("<tr><th>Doc").count(), 2);
    assert!(!html.contains("Doc2"));
}
