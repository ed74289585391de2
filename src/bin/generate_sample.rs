use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use variant_panel::data::model::{significance_options, ExternalSourceEntry, GenotypeChoice, Variant};

/// SplitMix64: small, seedable, good enough for reproducible sample data.
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const GENES: [&str; 8] = ["BRCA1", "BRCA2", "TP53", "CFTR", "MTHFR", "APOE", "LDLR", "MLH1"];
const BASES: [&str; 4] = ["A", "C", "G", "T"];
const AMINO_ACIDS: [&str; 8] = ["Ala", "Arg", "Gly", "Glu", "Leu", "Pro", "Ser", "Val"];

fn generate_variant(rng: &mut SampleRng, id: usize) -> Variant {
    let gene = rng.pick(&GENES);
    let pos = 50 + rng.below(4000);
    let from = rng.pick(&BASES);
    let to = rng.pick(&BASES);
    let coding = format!("c.{pos}{from}>{to}");

    let mut hgvs = BTreeMap::new();
    hgvs.insert("c.".to_string(), coding.clone());
    // Roughly a third of the calls have no protein consequence.
    let protein = if rng.below(3) == 0 {
        String::new()
    } else {
        format!(
            "p.{}{}{}",
            rng.pick(&AMINO_ACIDS),
            pos / 3 + 1,
            rng.pick(&AMINO_ACIDS)
        )
    };
    hgvs.insert("p.".to_string(), protein);

    let clinvar_id = 10_000 + id * 37;
    let external_source_entries = vec![ExternalSourceEntry {
        source_genetic_variant_identifier: clinvar_id.to_string(),
        source_genetic_variant_url: format!(
            "https://www.ncbi.nlm.nih.gov/clinvar/variation/{clinvar_id}/"
        ),
        annotation_source_name: "ClinVar".to_string(),
    }];

    Variant {
        allele_name: format!("{gene} {coding}"),
        genotype: rng.pick(&GenotypeChoice::ALL).canonical().to_string(),
        significance: rng.pick(significance_options()).as_str().to_string(),
        hgvs,
        external_source_entries,
    }
}

/// Encode external sources the way the tabular loader reads them.
fn encode_sources(entries: &[ExternalSourceEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}|{}|{}",
                e.annotation_source_name, e.source_genetic_variant_identifier, e.source_genetic_variant_url
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn main() {
    let mut rng = SampleRng::new(42);
    let variants: Vec<Variant> = (0..40).map(|i| generate_variant(&mut rng, i)).collect();

    // Write JSON
    let json_path = "sample_variants.json";
    let file = std::fs::File::create(json_path).expect("Failed to create JSON file");
    serde_json::to_writer_pretty(file, &variants).expect("Failed to write JSON");

    // Build Arrow arrays
    let column = |f: &dyn Fn(&Variant) -> String| {
        StringArray::from(variants.iter().map(f).collect::<Vec<String>>())
    };
    let hgvs_column = |key: &str| column(&|v: &Variant| v.hgvs.get(key).cloned().unwrap_or_default());

    let schema = Arc::new(Schema::new(vec![
        Field::new("alleleName", DataType::Utf8, false),
        Field::new("genotype", DataType::Utf8, false),
        Field::new("significance", DataType::Utf8, false),
        Field::new("hgvs:c.", DataType::Utf8, false),
        Field::new("hgvs:p.", DataType::Utf8, false),
        Field::new("externalSources", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(column(&|v: &Variant| v.allele_name.clone())),
            Arc::new(column(&|v: &Variant| v.genotype.clone())),
            Arc::new(column(&|v: &Variant| v.significance.clone())),
            Arc::new(hgvs_column("c.")),
            Arc::new(hgvs_column("p.")),
            Arc::new(column(&|v: &Variant| encode_sources(&v.external_source_entries))),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_variants.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} variants to {json_path} and {parquet_path}",
        variants.len()
    );
}
