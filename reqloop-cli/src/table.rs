//! 表格渲染
//! Table rendering

use reqloop::reporter::{Reporter, RequestView};
use reqloop::request::RequestInfo;
use std::io::Write;

const HEADERS: [&str; 3] = ["id", "name", "status"];

/// 将请求列表渲染为文本表格
/// Render a list of requests as a text table
pub(crate) fn render_table(requests: &[RequestInfo]) -> String {
  let rows: Vec<[String; 3]> = requests
    .iter()
    .map(|request| {
      [
        request.id.to_string(),
        request.name.clone(),
        request.status.as_str().to_string(),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(|header| header.chars().count());
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let border: String = widths
    .iter()
    .map(|width| "-".repeat(width + 2))
    .collect::<Vec<_>>()
    .join("+");
  let border = format!("+{border}+\n");

  let mut out = border.clone();
  out.push_str(&format_row(&HEADERS.map(String::from), &widths));
  out.push_str(&border);
  for row in &rows {
    out.push_str(&format_row(row, &widths));
  }
  if !rows.is_empty() {
    out.push_str(&border);
  }
  out
}

fn format_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
  let cells: Vec<String> = cells
    .iter()
    .zip(widths)
    .map(|(cell, width)| format!(" {cell}{} ", " ".repeat(width - cell.chars().count())))
    .collect();
  format!("|{}|\n", cells.join("|"))
}

/// 输出到标准输出的表格展示
/// Table reporter writing to stdout
pub(crate) struct TableReporter;

impl Reporter for TableReporter {
  fn render(&self, view: RequestView, requests: &[RequestInfo]) {
    let table = render_table(requests);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(table.as_bytes()).and_then(|_| stdout.flush()) {
      tracing::warn!("Failed to print {:?} requests: {}", view, e);
    }
  }

  fn accepted(&self, request: &RequestInfo) {
    println!("Request '{}' will be processed soon", request.name);
  }
}
