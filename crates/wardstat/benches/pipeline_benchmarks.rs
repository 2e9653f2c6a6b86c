//! Pipeline performance benchmarks.
//!
//! Measures parsing, cleaning and the full report across table sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fs;
use tempfile::TempDir;
use wardstat::input::Parser;
use wardstat::transform::TransformEngine;
use wardstat::{DatasetPaths, Hospital, TableKind};

const DEPARTMENTS: [&str; 6] = [
    "Cardiology",
    "Emergency",
    "Pediatrics",
    "Surgery",
    "Radiology",
    "Orthopedics",
];

/// Synthetic patient table with gaps, duplicates and the odd bad number.
fn generate_patients(rows: usize) -> String {
    let mut data = String::from(
        "Patient ID;Diagnosis;Gender;Age;Length of Stay;Blood Pressure;Blood Sugar;Cholesterol\n",
    );
    for row in 0..rows {
        // every 20th row repeats its predecessor
        let id = if row % 20 == 19 { row - 1 } else { row };
        let diagnosis = ["flu", "cold", "asthma", "diabetes"][id % 4];
        let gender = if id % 2 == 0 { "M" } else { "F" };
        let age = if id % 50 == 7 { "unknown".to_string() } else { (20 + id % 60).to_string() };
        let stay = if id % 9 == 0 { String::new() } else { (1 + id % 14).to_string() };
        data.push_str(&format!(
            "{};{};{};{};{};{};{};{}\n",
            id,
            diagnosis,
            gender,
            age,
            stay,
            110 + id % 40,
            80 + id % 30,
            160 + id % 80
        ));
    }
    data
}

fn generate_staff(rows: usize) -> String {
    let mut data = String::from("Name;Role;Department;Patients Attended;Avg Treatment Success\n");
    for row in 0..rows {
        let role = if row % 3 == 0 { "Doctor" } else { "Nurse" };
        data.push_str(&format!(
            "Staff_{};{};{};{};0.{}\n",
            row,
            role,
            DEPARTMENTS[row % DEPARTMENTS.len()],
            row % 300,
            70 + row % 30
        ));
    }
    data
}

fn generate_operations(rows: usize) -> String {
    let mut data = String::from("Type;Department;Success Rate\n");
    for row in 0..rows {
        data.push_str(&format!(
            "Procedure_{};{};0.{}\n",
            row % 12,
            DEPARTMENTS[row % DEPARTMENTS.len()],
            75 + row % 25
        ));
    }
    data
}

fn generate_finance(rows: usize) -> String {
    let mut data = String::from("Department;Revenue;Expenses\n");
    for row in 0..rows {
        data.push_str(&format!(
            "{};{};{}\n",
            DEPARTMENTS[row % DEPARTMENTS.len()],
            1_000 + row * 7 % 500,
            900 + row * 11 % 400
        ));
    }
    data
}

fn write_dataset(rows: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Patients.csv"), generate_patients(rows)).unwrap();
    fs::write(dir.path().join("Staff.csv"), generate_staff(rows / 10 + 1)).unwrap();
    fs::write(dir.path().join("Operations.csv"), generate_operations(rows / 5 + 1)).unwrap();
    fs::write(dir.path().join("Finance.csv"), generate_finance(rows / 20 + 1)).unwrap();
    dir
}

/// Benchmark parsing the patient table.
fn bench_parse_patients(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_patients");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_patients(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_bytes("patients", data.as_bytes(), b';').unwrap()))
        });
    }

    group.finish();
}

/// Benchmark cleaning (normalize, dedup, fill, coerce) a parsed patient table.
fn bench_clean_patients(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_patients");

    for rows in [100, 1_000, 10_000].iter() {
        let table = Parser::new()
            .parse_bytes("patients", generate_patients(*rows).as_bytes(), b';')
            .unwrap();
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            let engine = TransformEngine::new();
            b.iter_with_setup(
                || table.clone(),
                |mut t| black_box(engine.clean(TableKind::Patients, &mut t).unwrap()),
            )
        });
    }

    group.finish();
}

/// Benchmark the whole report from files on disk.
fn bench_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_report");
    group.sample_size(20);

    for rows in [100, 1_000, 10_000].iter() {
        let dir = write_dataset(*rows);
        let paths = DatasetPaths::in_dir(dir.path());
        group.bench_with_input(BenchmarkId::new("patients", rows), &paths, |b, paths| {
            let hospital = Hospital::new();
            b.iter(|| black_box(hospital.report(paths).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_patients,
    bench_clean_patients,
    bench_full_report,
);
criterion_main!(benches);
