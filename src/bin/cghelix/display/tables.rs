use std::collections::BTreeMap;
use std::io::{self, Write};

use cghelix::{ColumnSummary, Residue};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_structure_info(residues: &[Residue]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let beads: usize = residues.iter().map(Residue::bead_count).sum();
    let mut chains: Vec<char> = residues.iter().map(|r| r.chain_id).collect();
    chains.dedup();

    let strand_len = residues.len() / 2;
    let sequence: String = residues[..strand_len]
        .iter()
        .map(|r| match r.base_type() {
            Ok(base) => base.to_string(),
            Err(_) => "?".to_string(),
        })
        .collect();

    let rows = vec![
        ("Residues", format!("{}", residues.len())),
        ("Base Pairs", format!("{strand_len}")),
        ("Beads", format!("{beads}")),
        ("Chains", format!("{}", chains.len())),
        ("Strand I (5'→3')", sequence),
    ];

    print_kv_table(&mut out, "Structure Summary", &rows);
    print_composition(&mut out, residues);
}

fn print_composition(out: &mut impl Write, residues: &[Residue]) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for residue in residues {
        let key = match residue.base_type() {
            Ok(base) => base.to_string(),
            Err(_) => residue.name.clone(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let total = residues.len();
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(out, "{}┌─ Base Composition ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, "Base", "Count", "Distribution",
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in &sorted {
        let pct = (*count as f64 / total as f64) * 100.0;
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

/// Prints mean, standard deviation and range of every column of a table.
pub fn print_parameter_summary(title: &str, summary: &[ColumnSummary]) {
    if summary.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let name_w = 12usize;
    let num_w = 8usize;

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{mid}{}{mid}{}{mid}{}{right}",
            "─".repeat(name_w + 2),
            "─".repeat(num_w + 2),
            "─".repeat(num_w + 2),
            "─".repeat(num_w + 2),
            "─".repeat(num_w + 2),
        )
    };

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>num_w$} │ {:>num_w$} │ {:>num_w$} │ {:>num_w$} │",
        INDENT, "Parameter", "Mean", "Std", "Min", "Max",
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for column in summary {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>num_w$.2} │ {:>num_w$.2} │ {:>num_w$.2} │ {:>num_w$.2} │",
            INDENT,
            truncate(column.name, name_w),
            column.mean,
            column.std_dev,
            column.min,
            column.max,
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
