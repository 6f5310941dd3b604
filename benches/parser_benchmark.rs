//! Performance benchmarks for the log-merging parser
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crimp_quality::filter::sort_records;
use crimp_quality::models::Column;
use crimp_quality::LogParser;
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate a station log with `num_wires` wires, each with a crimp, pull and
/// length line, plus a fresh session header every 50 wires.
fn generate_test_log(num_wires: usize, include_noise: bool) -> String {
    let mut lines = vec!["<html><body>".to_string()];

    for i in 0..num_wires {
        if i % 50 == 0 {
            lines.push(format!("<p>LearnStarted ( 2024-03-01 08:{:02}:00 )</p>", (i / 50) % 60));
            lines.push(format!(
                "<p>UserName = <font color=\"#0000FF\"><b>op{}</b></font></p>",
                i % 7
            ));
            lines.push(format!(
                "<p>ArticleKey = <font color=\"#0000FF\"><b>ART-{}</b></font></p>",
                i / 50
            ));
        }
        let status = if i % 13 == 0 { "FALSE" } else { "TRUE" };
        lines.push(format!(
            "<p>CrimpHeight = <b>\"W{}\",\"T{}\",\"{}\",\"{:.2}\",\"0.05\"</b></p>",
            i,
            i % 4,
            status,
            1.8 + (i % 10) as f64 * 0.01
        ));
        lines.push(format!(
            "<p>PullOffForce = <b>\"W{}\",\"T{}\",\"PASS\",\"{:.1}\"</b></p>",
            i,
            i % 4,
            40.0 + (i % 20) as f64
        ));
        lines.push(format!(
            "<p>WireLength = <b>\"W{}\",\"TRUE\",\"{:.1}\"</b></p>",
            i,
            100.0 + (i % 30) as f64
        ));
        if include_noise && i % 10 == 5 {
            lines.push("<p>CrimpHeight = <b>\"W1\",\"T1\"</b></p>".to_string());
            lines.push("<p>Station heartbeat</p>".to_string());
        }
    }

    lines.push("</body></html>".to_string());
    lines.join("\r\n")
}

fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn benchmark_parse_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_str");
    let parser = LogParser::new();

    for size in [10, 100, 1000, 10000].iter() {
        let log = generate_test_log(*size, false);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parser.parse_str(black_box(&log), "2024-03-01"));
        });
    }

    group.finish();
}

fn benchmark_parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_file");
    let parser = LogParser::new();

    for size in [100, 1000, 10000].iter() {
        let temp_file = create_temp_file(&generate_test_log(*size, true));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parser.parse_file(black_box(temp_file.path()), "2024-03-01"));
        });
    }

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let records = LogParser::new().parse_str(&generate_test_log(5000, false), "2024-03-01");

    c.bench_function("sort_by_crimp_height", |b| {
        b.iter(|| {
            let mut rows = records.clone();
            sort_records(black_box(&mut rows), Column::CrimpHeight, true);
            rows
        });
    });
}

criterion_group!(benches, benchmark_parse_str, benchmark_parse_file, benchmark_sort);
criterion_main!(benches);
