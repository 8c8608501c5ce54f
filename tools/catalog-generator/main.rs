use clap::Parser;
use kensa::schema::{
    BlockType, Catalog, Choices, DatabaseSelectSpec, NumberSpec, OutputMode, PortLimit, PortSpec,
    Property, PropertyKind, QuerySource, QuerySpec, SelectOption, SelectSpec, SystemVariable,
    TextSpec,
};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::json;
use std::fs;

/// A CLI tool to generate synthetic block catalogs for the Kensa validator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_catalog.json")]
    output: String,

    /// The number of block types to generate
    #[arg(long, default_value_t = 25)]
    blocks: usize,

    /// The maximum number of properties per block type
    #[arg(long, default_value_t = 8)]
    max_properties: usize,

    /// Inject a known set of defects into the first block types
    #[arg(long)]
    defects: bool,
}

const CATEGORIES: [&str; 5] = ["call_control", "playback", "functions", "applications", "custom"];
const ICONS: [&str; 6] = ["📞", "🔊", "💬", "🔀", "🌐", "⚙️"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_properties == 0 {
        eprintln!("Error: --max-properties must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating catalog with {} block type(s) (up to {} properties each)...",
        cli.blocks, cli.max_properties
    );

    let mut catalog = Catalog::default();
    for index in 0..cli.blocks {
        let block = generate_block(&mut rng, index, cli.max_properties);
        catalog.block_types.insert(block.id.clone(), block);
    }
    catalog.system_variables = generate_system_variables();

    let mut document = serde_json::to_value(&catalog)?;
    if cli.defects {
        let injected = inject_defects(&mut document);
        println!("-> Injected {} defect(s).", injected);
    }

    fs::write(&cli.output, serde_json::to_string_pretty(&document)?)?;
    println!("Successfully generated and saved catalog to '{}'", cli.output);

    Ok(())
}

fn generate_block(rng: &mut ThreadRng, index: usize, max_properties: usize) -> BlockType {
    let id = format!("block_{:03}", index);
    let mut block = BlockType::template(&id, &format!("Block {}", index));
    block.category = CATEGORIES[rng.random_range(0..CATEGORIES.len())].to_string();
    block.icon = ICONS[rng.random_range(0..ICONS.len())].to_string();
    block.color = format!("#{:06X}", rng.random_range(0..=0xFF_FFFF));

    let max_inputs = rng.random_range(1..=3);
    block.inputs = PortSpec::new(rng.random_range(0..=1), PortLimit::AtMost(max_inputs), &["input"]);
    if rng.random_bool(0.2) {
        block.outputs.max = PortLimit::Unlimited;
        block.outputs.mode = Some(OutputMode::Dynamic);
    }

    let count = rng.random_range(1..=max_properties);
    block.properties = (0..count).map(|slot| generate_property(rng, slot)).collect();
    block
}

fn generate_property(rng: &mut ThreadRng, slot: usize) -> Property {
    let key = format!("field_{}", slot);
    let kind = match rng.random_range(0..5) {
        0 => PropertyKind::Text(TextSpec {
            show_predefined_variables: rng.random_bool(0.5),
            ..TextSpec::default()
        }),
        1 => {
            let min = rng.random_range(0.0..10.0_f64).floor();
            PropertyKind::Number(NumberSpec {
                min: Some(min),
                max: Some(min + rng.random_range(1.0..100.0_f64).floor()),
                step: Some(1.0),
                default: None,
            })
        }
        2 => PropertyKind::Boolean(Default::default()),
        3 => PropertyKind::Select(SelectSpec {
            choices: Choices::Flat {
                options: (0..rng.random_range(1..6))
                    .map(|i| SelectOption::Bare(format!("option_{}", i)))
                    .collect(),
            },
            searchable: false,
            search_placeholder: None,
        }),
        _ => {
            // Dependent dropdowns need an earlier sibling to point at.
            let depends_on = (slot > 0 && rng.random_bool(0.4)).then(|| format!("field_{}", slot - 1));
            let query = match &depends_on {
                Some(parent) => format!("SELECT id, name FROM items WHERE parent_id = {{{{{}}}}}", parent),
                None => "SELECT id, name FROM items".to_string(),
            };
            PropertyKind::SelectDatabase(DatabaseSelectSpec {
                source: QuerySource::Single(QuerySpec {
                    query,
                    value_field: "id".to_string(),
                    label_field: "name".to_string(),
                }),
                preview_field: None,
                property_type: None,
                searchable: rng.random_bool(0.5),
                depends_on,
                dependency_optional: false,
                options: Vec::new(),
                disabled_placeholder: None,
            })
        }
    };
    Property {
        label: format!("Field {}", slot),
        key,
        required: rng.random_bool(0.3),
        kind,
    }
}

fn generate_system_variables() -> Vec<SystemVariable> {
    ["caller_id", "called_number", "call_uuid"]
        .iter()
        .map(|name| SystemVariable {
            key: format!("{{{{{}}}}}", name),
            description: format!("The {} of the current call", name.replace('_', " ")),
        })
        .collect()
}

/// Breaks the generated document in ways the validator must catch. Returns
/// how many defects were written.
fn inject_defects(document: &mut serde_json::Value) -> usize {
    let Some(blocks) = document["blockTypes"].as_object_mut() else {
        return 0;
    };
    let mut injected = 0;
    let mut targets = blocks.values_mut();

    if let Some(block) = targets.next() {
        block["color"] = json!("#ZZZZZZ");
        injected += 1;
    }
    if let Some(block) = targets.next() {
        block["inputs"] = json!({ "min": 2, "max": 1, "labels": ["a"] });
        injected += 1;
    }
    if let Some(block) = targets.next() {
        if let Some(properties) = block["properties"].as_array_mut() {
            properties.insert(
                0,
                json!({
                    "key": "early_child",
                    "label": "Early child",
                    "type": "select_database",
                    "dependsOn": "late_parent",
                    "query": "SELECT id FROM t WHERE p = {{late_parent}}",
                    "valueField": "id",
                    "labelField": "id"
                }),
            );
            properties.push(json!({ "key": "late_parent", "label": "Late parent", "type": "text" }));
            injected += 1;
        }
    }
    if let Some(block) = targets.next() {
        if let Some(properties) = block["properties"].as_array_mut() {
            properties.push(json!({
                "key": "dangerous",
                "label": "Dangerous",
                "type": "select_database",
                "query": "DROP TABLE users",
                "valueField": "id",
                "labelField": "id"
            }));
            injected += 1;
        }
    }
    injected
}
