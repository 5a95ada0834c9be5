use serde::Serialize;

use hp_predict::KnownStructures;
use hp_predict::PredictionRecord;
use hp_predict::SerializablePrediction;

/// Shown when no patient name was given.
pub const NO_PATIENT: &str = "N/A";

/// A prediction together with the caller's patient label. The label is
/// carried alongside the record and never influences it.
#[derive(Serialize)]
pub struct PatientReport<'a> {
    #[serde(rename = "patientName")]
    pub patient_name: &'a str,
    pub name: Option<&'a str>,
    pub prediction: SerializablePrediction<'a>,
}

impl<'a> PatientReport<'a> {
    pub fn new(record: &'a PredictionRecord, name: Option<&'a str>, patient_name: Option<&'a str>) -> Self {
        PatientReport {
            patient_name: patient_name.unwrap_or(NO_PATIENT),
            name,
            prediction: record.to_serializable(),
        }
    }
}

/// Plain text summary of one record.
pub fn format_report(record: &PredictionRecord, patient_name: Option<&str>) -> String {
    let mut lines = vec![
        format!("{:<13}{}", "RNA ID:", record.id),
        format!("{:<13}{}", "Patient:", patient_name.unwrap_or(NO_PATIENT)),
        format!("{:<13}{} nucleotides", "Length:", record.composition.length),
        format!("{:<13}{:.1}%", "GC Content:", record.composition.gc_percent()),
        format!("{:<13}{}", "Stability:", record.annotations.stability),
        format!("{:<13}{}", "Function:", record.annotations.function),
        format!("{:<13}{}", "Source:", record.source),
        format!("{:<13}{}", "Pairs:", record.structure.pair_count()),
        record.sequence.to_string(),
        record.structure.to_string(),
        "Interactions:".to_string(),
    ];
    for interaction in record.annotations.interactions {
        lines.push(format!("  - {}", interaction));
    }
    lines.join("\n")
}

/// One line per table entry, sorted by sequence: sequence, structure and
/// number of base pairs.
pub fn format_known(known: &KnownStructures) -> String {
    let mut entries: Vec<_> = known.iter()
        .map(|(seq, db)| (seq.to_string(), db.to_string(), db.pair_count()))
        .collect();
    entries.sort();
    entries.iter()
        .map(|(seq, db, pairs)| format!("{}\t{}\t{}", seq, db, pairs))
        .collect::<Vec<_>>()
        .join("\n")
}
