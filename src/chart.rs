use crate::data::GenreAggregate;
use std::fmt::Write;

pub const CHART_WIDTH: f64 = 900.0;
pub const MIN_CHART_HEIGHT: usize = 480;
pub const BAR_HEIGHT: usize = 32;
pub const BAR_GAP: usize = 12;
pub const LEFT_MARGIN: f64 = 180.0;
pub const RIGHT_MARGIN: f64 = 40.0;
pub const ORIGIN_Y: usize = 80;
pub const TOP_GENRES: usize = 10;

pub const BAR_SPAN: f64 = CHART_WIDTH - LEFT_MARGIN - RIGHT_MARGIN;

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// 1000 -> "1,000"
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn chart_height(bars: usize) -> usize {
    MIN_CHART_HEIGHT.max(bars * (BAR_HEIGHT + BAR_GAP) + 120)
}

/// Bar length for `score`, the largest score fills `BAR_SPAN`.
pub fn bar_width(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        BAR_SPAN * (score / max_score)
    } else {
        0.0
    }
}

/// Horizontal bar chart of the best genres. Expects `summary` sorted by
/// weighted score, descending, as `aggregate_genres` returns it.
pub fn render_chart(summary: &[GenreAggregate], selection_limit: usize) -> String {
    let top = &summary[..summary.len().min(TOP_GENRES)];
    let max_score = top
        .iter()
        .map(|g| g.weighted_score)
        .reduce(f64::max)
        .unwrap_or(1.0);
    let height = chart_height(top.len());

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{CHART_WIDTH}' height='{height}'>"
    );
    svg.push_str(
        "<style>text{font-family:Arial, sans-serif; font-size:14px; fill:#1a202c;} \
         .title{font-size:18px; font-weight:bold;}</style>\n",
    );
    svg.push_str("<rect width='100%' height='100%' fill='#ffffff'/>\n");
    let _ = writeln!(
        svg,
        "<text x='30' y='40' class='title'>Top Genres by Weighted Score (Last {} Releases)</text>",
        group_thousands(selection_limit)
    );

    for (idx, genre) in top.iter().enumerate() {
        let y = ORIGIN_Y + idx * (BAR_HEIGHT + BAR_GAP);
        let width = bar_width(genre.weighted_score, max_score);
        let _ = writeln!(
            svg,
            "<text x='30' y='{}'>{}</text>",
            y + 20,
            xml_escape(&genre.genre)
        );
        let _ = writeln!(
            svg,
            "<rect x='{LEFT_MARGIN}' y='{y}' width='{width:.1}' height='{BAR_HEIGHT}' fill='#2b6cb0'/>"
        );
        let _ = writeln!(
            svg,
            "<text x='{:.1}' y='{}'>{:?}</text>",
            LEFT_MARGIN + width + 8.0,
            y + 20,
            genre.weighted_score
        );
    }

    svg.push_str("</svg>");
    svg
}
