// Server-rendered pages for the upload flow.

use fraudscan_domain::{ResultRow, ResultsPage};

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 40px auto;
            max-width: 1100px;
            color: #222;
        }
        h1 {
            font-size: 24px;
            margin-bottom: 20px;
        }
        table {
            border-collapse: collapse;
            width: 100%;
        }
        th, td {
            border: 1px solid #ccc;
            padding: 6px 10px;
            text-align: left;
        }
        th {
            background: #f0f0f0;
        }
        tr.fraud td {
            background: #fde2e2;
        }
        .pager {
            margin-top: 16px;
            display: flex;
            gap: 16px;
            align-items: center;
        }
        .button {
            display: inline-block;
            padding: 8px 16px;
            background: #1f6feb;
            color: #fff;
            text-decoration: none;
            border-radius: 4px;
        }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

/// GET /
pub fn upload_form_page() -> String {
    layout(
        "Transaction Fraud Check",
        r#"<h1>Upload transactions</h1>
<form action="/upload" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".csv">
    <button type="submit" class="button">Upload</button>
</form>"#,
    )
}

/// GET /results_button
pub fn results_button_page() -> String {
    layout(
        "Upload Complete",
        r#"<h1>File processed</h1>
<p>The transactions were scored and stored.</p>
<p><a class="button" href="/fetch_results">View results</a></p>
<p><a href="/">Upload another file</a></p>"#,
    )
}

/// GET /fetch_results
pub fn results_page(page: &ResultsPage) -> String {
    let rows = if page.rows.is_empty() {
        r#"<tr><td colspan="6">No results on this page.</td></tr>"#.to_string()
    } else {
        page.rows.iter().map(result_row).collect::<Vec<_>>().join("\n")
    };

    let mut pager = Vec::new();
    if page.has_previous() {
        pager.push(format!(
            r#"<a href="/fetch_results?page={}">Previous</a>"#,
            page.previous_page()
        ));
    }
    pager.push(format!(
        "<span>Page {} of {}</span>",
        page.page, page.total_pages
    ));
    if page.has_next() {
        pager.push(format!(
            r#"<a href="/fetch_results?page={}">Next</a>"#,
            page.next_page()
        ));
    }

    let body = format!(
        r#"<h1>Results for {filename}</h1>
<p>{total} transactions</p>
<table>
    <thead>
        <tr><th>TransactionID</th><th>Amount</th><th>Date</th><th>Location</th><th>Time</th><th>Fraud</th></tr>
    </thead>
    <tbody>
{rows}
    </tbody>
</table>
<div class="pager">{pager}</div>
<p><a href="/">Upload another file</a></p>"#,
        filename = escape_html(&page.filename),
        total = page.total_docs,
        rows = rows,
        pager = pager.join("\n"),
    );
    layout("Results", &body)
}

fn result_row(row: &ResultRow) -> String {
    format!(
        r#"        <tr{class}><td>{id}</td><td>{amount}</td><td>{date}</td><td>{location}</td><td>{time}</td><td>{fraud}</td></tr>"#,
        class = if row.is_fraud { r#" class="fraud""# } else { "" },
        id = escape_html(&row.transaction_id),
        amount = escape_html(&row.amount),
        date = escape_html(&row.date),
        location = escape_html(&row.location),
        time = escape_html(&row.time),
        fraud = if row.is_fraud { "Yes" } else { "No" },
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, is_fraud: bool) -> ResultRow {
        ResultRow {
            transaction_id: id.to_string(),
            amount: "10.5".to_string(),
            date: "2024-01-05".to_string(),
            location: "Berlin".to_string(),
            time: "10:00".to_string(),
            is_fraud,
        }
    }

    fn page(number: i64, total_docs: u64, rows: Vec<ResultRow>) -> ResultsPage {
        ResultsPage {
            filename: "jan.csv".to_string(),
            rows,
            page: number,
            per_page: 100,
            total_docs,
            total_pages: total_docs.div_ceil(100),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn upload_form_posts_file_field() {
        let html = upload_form_page();
        assert!(html.contains(r#"action="/upload""#));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"name="file""#));
    }

    #[test]
    fn results_table_marks_fraud_and_escapes_cells() {
        let html = results_page(&page(1, 2, vec![row("T1", true), row("<T2>", false)]));
        assert!(html.contains(r#"<tr class="fraud"><td>T1</td>"#));
        assert!(html.contains("<td>&lt;T2&gt;</td>"));
        assert!(html.contains("Page 1 of 1"));
        assert!(!html.contains("Previous"));
        assert!(!html.contains("Next"));
    }

    #[test]
    fn middle_page_links_both_ways() {
        let html = results_page(&page(2, 250, vec![row("T101", false)]));
        assert!(html.contains(r#"href="/fetch_results?page=1">Previous"#));
        assert!(html.contains(r#"href="/fetch_results?page=3">Next"#));
        assert!(html.contains("Page 2 of 3"));
    }

    #[test]
    fn empty_window_renders_placeholder() {
        let html = results_page(&page(9, 250, Vec::new()));
        assert!(html.contains("No results on this page."));
        assert!(html.contains("Page 9 of 3"));
    }
}
