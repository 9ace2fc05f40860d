use std::fmt::Display;

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::error::AttrResult;
use crate::vectorizer::evaluate::scoring::Hits;

const NO_RESULTS: &str = "No analysis has been run or no results were generated.";

const NOTES: &str = "\
--- Interpretation Notes ---
Scores range from 0 (dissimilar) to 1 (identical). A higher score suggests a stronger stylistic match.
Consider the 'Message Count' as a confidence metric; a high score from a user with many messages is more significant.";

#[derive(Debug, Serialize)]
struct RankingRow<'a, K> {
    rank: usize,
    author_id: &'a K,
    score: f64,
    message_count: u64,
}

fn rows<K>(hits: &Hits<K>, top_n: usize) -> impl Iterator<Item = RankingRow<'_, K>> + '_ {
    hits.top(top_n).iter().enumerate().map(|(i, hit)| RankingRow {
        rank: i + 1,
        author_id: &hit.key,
        score: hit.score,
        message_count: hit.message_count,
    })
}

/// Ranking as a text table plus interpretation notes.
pub fn ranking_table<K: Display>(hits: &Hits<K>, top_n: usize) -> String {
    if hits.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("AuthorID").add_attribute(Attribute::Bold),
        Cell::new("Similarity Score").fg(Color::Cyan),
        Cell::new("Message Count"),
    ]);

    for row in rows(hits, top_n) {
        table.add_row(vec![
            Cell::new(row.rank),
            Cell::new(row.author_id),
            Cell::new(format!("{:.4}", row.score)).fg(Color::Cyan),
            Cell::new(row.message_count),
        ]);
    }

    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!("--- Authorship Likelihood Ranking ---\n{table}\n\n{NOTES}")
}

/// Same rows as [`ranking_table`], as a JSON array.
pub fn ranking_json<K: Serialize>(hits: &Hits<K>, top_n: usize) -> AttrResult<String> {
    let rows: Vec<RankingRow<'_, K>> = rows(hits, top_n).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
