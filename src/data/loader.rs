use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{ExternalSourceEntry, Variant};

/// Prefix marking an HGVS column in tabular formats: `hgvs:c.` → key `c.`.
pub const HGVS_COLUMN_PREFIX: &str = "hgvs:";
/// Column holding `name|identifier|url` entries separated by `;`.
pub const EXTERNAL_SOURCES_COLUMN: &str = "externalSources";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a variant list from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "alleleName": ..., "genotype": ..., "hgvs": {...}, ... }, ...]`
/// * `.csv`     – one variant per row, `hgvs:<key>` columns for HGVS values
/// * `.parquet` – same column layout as CSV, string columns
pub fn load_file(path: &Path) -> Result<Vec<Variant>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Variant>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON variant list")
}

// ---------------------------------------------------------------------------
// Tabular layout shared by CSV and Parquet
// ---------------------------------------------------------------------------

/// Column positions for a tabular variant file.
///
/// Required: `alleleName` (or `allele_name`), `genotype`, `significance`.
/// Optional: any number of `hgvs:<key>` columns and one `externalSources`
/// column.
#[derive(Debug)]
struct TableColumns {
    allele_name: usize,
    genotype: usize,
    significance: usize,
    hgvs: Vec<(usize, String)>,
    external_sources: Option<usize>,
}

impl TableColumns {
    fn from_headers(headers: &[&str]) -> Result<Self> {
        let find = |names: &[&str]| headers.iter().position(|h| names.contains(h));

        let allele_name = find(&["alleleName", "allele_name"])
            .context("missing 'alleleName' column")?;
        let genotype = find(&["genotype"]).context("missing 'genotype' column")?;
        let significance = find(&["significance"]).context("missing 'significance' column")?;
        let external_sources = find(&[EXTERNAL_SOURCES_COLUMN, "external_sources"]);

        let hgvs = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                h.strip_prefix(HGVS_COLUMN_PREFIX)
                    .map(|key| (i, key.to_string()))
            })
            .collect();

        Ok(Self {
            allele_name,
            genotype,
            significance,
            hgvs,
            external_sources,
        })
    }

    /// Build a variant from one row; `cell(i)` returns the text of column `i`.
    fn variant<'a>(&self, cell: impl Fn(usize) -> &'a str, row: usize) -> Result<Variant> {
        let hgvs: BTreeMap<String, String> = self
            .hgvs
            .iter()
            .map(|(i, key)| (key.clone(), cell(*i).to_string()))
            .collect();

        let external_source_entries = match self.external_sources {
            Some(i) => parse_external_sources(cell(i))
                .with_context(|| format!("Row {row}: invalid '{EXTERNAL_SOURCES_COLUMN}'"))?,
            None => Vec::new(),
        };

        Ok(Variant {
            allele_name: cell(self.allele_name).to_string(),
            genotype: cell(self.genotype).to_string(),
            significance: cell(self.significance).to_string(),
            hgvs,
            external_source_entries,
        })
    }
}

/// Parse `ClinVar|17662|https://...;dbSNP|rs80357914|https://...`.
fn parse_external_sources(s: &str) -> Result<Vec<ExternalSourceEntry>> {
    s.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, '|');
            let name = parts.next().unwrap_or("").trim();
            if name.is_empty() {
                bail!("entry '{entry}' has no source name");
            }
            Ok(ExternalSourceEntry {
                annotation_source_name: name.to_string(),
                source_genetic_variant_identifier: parts.next().unwrap_or("").trim().to_string(),
                source_genetic_variant_url: parts.next().unwrap_or("").trim().to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one variant per row.
///
/// ```text
/// alleleName,genotype,significance,hgvs:c.,hgvs:p.,externalSources
/// BRCA1 c.68_69delAG,HETEROZYGOUS,PATHOGENIC,c.68_69delAG,p.Glu23fs,ClinVar|17662|https://...
/// ```
fn load_csv(path: &Path) -> Result<Vec<Variant>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let names: Vec<&str> = headers.iter().collect();
    let columns = TableColumns::from_headers(&names).context("CSV header")?;

    let mut variants = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        variants.push(columns.variant(|i| record.get(i).unwrap_or(""), row_no)?);
    }

    Ok(variants)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV layout.
/// Columns must be Utf8 or LargeUtf8; nulls read as empty strings.
fn load_parquet(path: &Path) -> Result<Vec<Variant>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut variants = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let headers: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let columns = TableColumns::from_headers(&headers).context("parquet schema")?;

        let text_columns: Vec<Vec<String>> = batch
            .columns()
            .iter()
            .zip(schema.fields().iter())
            .map(|(col, field)| {
                extract_string_column(col)
                    .with_context(|| format!("column '{}'", field.name()))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            let cell = |i: usize| text_columns[i][row].as_str();
            variants.push(columns.variant(cell, row_offset + row)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(variants)
}

/// Read a whole string column; null cells become empty strings.
fn extract_string_column(col: &Arc<dyn Array>) -> Result<Vec<String>> {
    let values: Vec<String> = match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_string::<i32>();
            (0..arr.len())
                .map(|i| if arr.is_null(i) { String::new() } else { arr.value(i).to_string() })
                .collect()
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            (0..arr.len())
                .map(|i| if arr.is_null(i) { String::new() } else { arr.value(i).to_string() })
                .collect()
        }
        DataType::Null => vec![String::new(); col.len()],
        other => bail!("expected a string column, got {other:?}"),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::Builder;

    fn temp_with_suffix(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_json() {
        let file = temp_with_suffix(
            ".json",
            r#"[
                {
                    "alleleName": "BRCA1 c.68_69delAG",
                    "genotype": "HETEROZYGOUS",
                    "significance": "PATHOGENIC",
                    "hgvs": { "c.": "c.68_69delAG" },
                    "externalSourceEntries": []
                },
                {
                    "alleleName": "TP53 c.215C>G",
                    "genotype": "HOMOZYGOUS",
                    "significance": "BENIGN"
                }
            ]"#,
        );
        let variants = load_file(file.path()).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].hgvs["c."], "c.68_69delAG");
        assert!(variants[1].hgvs.is_empty());
    }

    #[test]
    fn test_load_json_rejects_non_array() {
        let file = temp_with_suffix(".json", r#"{ "alleleName": "X" }"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing JSON variant list"));
    }

    #[test]
    fn test_load_csv() {
        let file = temp_with_suffix(
            ".csv",
            "alleleName,genotype,significance,hgvs:c.,hgvs:p.,externalSources\n\
             BRCA1 c.68_69delAG,HETEROZYGOUS,PATHOGENIC,c.68_69delAG,p.Glu23fs,ClinVar|17662|https://example.org/17662;dbSNP|rs80357914\n\
             TP53 c.215C>G,HOMOZYGOUS,BENIGN,c.215C>G,,\n",
        );
        let variants = load_file(file.path()).unwrap();
        assert_eq!(variants.len(), 2);

        let brca = &variants[0];
        assert_eq!(brca.allele_name, "BRCA1 c.68_69delAG");
        assert_eq!(brca.hgvs["p."], "p.Glu23fs");
        assert_eq!(brca.external_source_entries.len(), 2);
        assert_eq!(brca.external_source_entries[0].annotation_source_name, "ClinVar");
        assert_eq!(
            brca.external_source_entries[0].source_genetic_variant_url,
            "https://example.org/17662"
        );
        assert_eq!(brca.external_source_entries[1].source_genetic_variant_identifier, "rs80357914");
        assert_eq!(brca.external_source_entries[1].source_genetic_variant_url, "");

        let tp53 = &variants[1];
        assert_eq!(tp53.hgvs["p."], "");
        assert!(tp53.external_source_entries.is_empty());
    }

    #[test]
    fn test_load_csv_missing_column() {
        let file = temp_with_suffix(".csv", "alleleName,significance\nX,BENIGN\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'genotype' column"));
    }

    #[test]
    fn test_external_sources_need_a_name() {
        assert!(parse_external_sources("|123|https://x").is_err());
        assert!(parse_external_sources("").unwrap().is_empty());
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("allele_name", DataType::Utf8, false),
            Field::new("genotype", DataType::Utf8, false),
            Field::new("significance", DataType::Utf8, false),
            Field::new("hgvs:c.", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["BRCA2 c.5946delT", "CFTR c.1521_1523delCTT"])),
                Arc::new(StringArray::from(vec!["HETEROZYGOUS", "HOMOZYGOUS"])),
                Arc::new(StringArray::from(vec!["LIKELY_PATHOGENIC", "PATHOGENIC"])),
                Arc::new(StringArray::from(vec![Some("c.5946delT"), None])),
            ],
        )
        .unwrap();

        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let variants = load_file(file.path()).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].significance, "LIKELY_PATHOGENIC");
        assert_eq!(variants[0].hgvs["c."], "c.5946delT");
        assert_eq!(variants[1].hgvs["c."], "");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_with_suffix(".vcf", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .vcf");
    }
}
