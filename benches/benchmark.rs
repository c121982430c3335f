//! パフォーマンスベンチマーク
//!
//! CMED価格表の変換処理の速度を測定します。
//!
//! 実装するベンチマーク:
//! - 行の抽出（セル変換・集計を含む）
//! - 価格セルの型変換
//! - ワークブックの読み込みからJSON出力まで

use cmedjson::{coerce, extract, Column, ConverterBuilder, Row};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

/// 明細行の生成
///
/// 公開ファイルと同様に、一部の列だけに値が入った行を作る。
fn generate_rows(record_count: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = vec![
        vec![Some("PREÇOS MÁXIMOS DE MEDICAMENTOS".to_string())],
        Column::ALL.iter().map(|c| Some(c.name().to_string())).collect(),
    ];

    for i in 0..record_count {
        let row: Row = Column::ALL
            .iter()
            .map(|column| match column {
                Column::Substancia => Some(format!("SUBSTÂNCIA {}", i % 500)),
                Column::Cnpj => Some(format!("{:02}.000.000/0001-00", i % 90)),
                Column::Laboratorio => Some(format!("LABORATÓRIO {}", i % 90)),
                Column::Apresentacao => Some(format!("{} MG COM REVESTIDO CT X {}", i % 50, i % 30)),
                Column::Cap | Column::Confaz87 => Some((if i % 3 == 0 { "Sim" } else { "Não" }).to_string()),
                Column::Ean2 | Column::Ean3 => Some("-".to_string()),
                c if c.name().starts_with("PF ") || c.name().starts_with("PMVG ") => {
                    Some(format!("{},{:02}", i % 1000, i % 100))
                }
                _ => Some("Texto".to_string()),
            })
            .collect();
        rows.push(row);
    }

    rows
}

/// 明細行ワークブックの生成
fn generate_workbook(record_count: usize) -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in generate_rows(record_count).iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string(r as u32, c as u16, value).unwrap();
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// 行の抽出
fn benchmark_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for record_count in [1_000usize, 10_000] {
        let rows = generate_rows(record_count);
        group.throughput(Throughput::Elements(record_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(record_count), &rows, |b, rows| {
            b.iter(|| extract(black_box(rows.clone()), false).unwrap());
        });
    }

    group.finish();
}

/// セルの型変換
fn benchmark_coerce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");

    group.bench_function("currency", |b| {
        b.iter(|| coerce(black_box(Some("1234,56*")), black_box("PMVG 17,5% ALC")))
    });
    group.bench_function("boolean", |b| {
        b.iter(|| coerce(black_box(Some(" Sim ")), black_box("CONFAZ 87")))
    });
    group.bench_function("text", |b| {
        b.iter(|| coerce(black_box(Some("COMPRIMIDO REVESTIDO")), black_box("APRESENTAÇÃO")))
    });

    group.finish();
}

/// ワークブックの読み込みからJSON出力まで
fn benchmark_convert(c: &mut Criterion) {
    let data = generate_workbook(2_000);
    let converter = ConverterBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    group.bench_function("workbook_to_json", |b| {
        b.iter(|| {
            let table = converter.convert(Cursor::new(black_box(data.clone()))).unwrap();
            let mut output = Vec::new();
            converter.write(&table, "cmed.json", &mut output).unwrap();
            black_box(output)
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_extract, benchmark_coerce, benchmark_convert);
criterion_main!(benches);
