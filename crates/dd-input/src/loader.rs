//! JSON problem loader.
//!
//! # Document format
//!
//! `warehouses` and `agents` accept either of two shapes:
//!
//! ```json
//! { "warehouses": { "W1": [0, 0], "W2": [50, 50] } }
//! { "warehouses": [ { "id": "W1", "location": [0, 0] } ] }
//! ```
//!
//! `packages` is always a list.  The source warehouse may be named by either
//! `warehouse` or `warehouse_id`:
//!
//! ```json
//! { "packages": [ { "id": "P1", "warehouse": "W1", "destination": [10, 10] } ] }
//! ```
//!
//! A missing section is treated as empty.  Keyed sections keep document
//! order, which matters because agent order decides distance ties.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use dd_core::{Agent, AgentId, Location, Package, PackageId, Warehouse, WarehouseId};

use crate::{InputError, InputResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LocatedRecord {
    id:       String,
    location: Location,
}

#[derive(Deserialize)]
struct PackageRecord {
    id:          PackageId,
    #[serde(alias = "warehouse_id")]
    warehouse:   WarehouseId,
    destination: Location,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// The typed contents of one input document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemInput {
    pub warehouses: Vec<Warehouse>,
    /// In document order.
    pub agents:     Vec<Agent>,
    /// In document order; this is the assignment order.
    pub packages:   Vec<Package>,
}

/// Load a problem from a JSON file.
pub fn load_input(path: &Path) -> InputResult<ProblemInput> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _                   => InputError::Io(e),
    })?;
    let input = load_input_reader(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        warehouses = input.warehouses.len(),
        agents = input.agents.len(),
        packages = input.packages.len(),
        "input loaded"
    );
    Ok(input)
}

/// Like [`load_input`] but accepts any `Read` source.
pub fn load_input_reader<R: Read>(reader: R) -> InputResult<ProblemInput> {
    let doc: Value = serde_json::from_reader(reader).map_err(classify)?;
    from_document(doc)
}

/// Parse a problem from an in-memory JSON string.
pub fn load_input_str(s: &str) -> InputResult<ProblemInput> {
    let doc: Value = serde_json::from_str(s).map_err(classify)?;
    from_document(doc)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn classify(e: serde_json::Error) -> InputError {
    if e.is_io() {
        InputError::Io(e.into())
    } else {
        InputError::Syntax(e)
    }
}

fn from_document(doc: Value) -> InputResult<ProblemInput> {
    let Value::Object(mut root) = doc else {
        return Err(InputError::NotAnObject);
    };

    let warehouses = located_section(root.remove("warehouses"), "warehouses")?
        .into_iter()
        .map(|(id, loc)| Warehouse::new(WarehouseId::from(id), loc))
        .collect();

    let agents = located_section(root.remove("agents"), "agents")?
        .into_iter()
        .map(|(id, loc)| Agent::new(AgentId::from(id), loc))
        .collect();

    let packages = package_section(root.remove("packages"))?;

    Ok(ProblemInput { warehouses, agents, packages })
}

/// Parse a section that may be keyed (`id → [x, y]`) or a list of
/// `{id, location}` records.
fn located_section(value: Option<Value>, section: &'static str) -> InputResult<Vec<(String, Location)>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => map
            .into_iter()
            .map(|(id, coords)| {
                let loc = record::<Location>(coords, section, format!("{id:?}"))?;
                Ok((id, loc))
            })
            .collect(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let r = record::<LocatedRecord>(item, section, format!("#{i}"))?;
                Ok((r.id, r.location))
            })
            .collect(),
        Some(_) => Err(InputError::InvalidSection {
            section,
            expected: "an object of id → [x, y] or a list of {id, location} records",
        }),
    }
}

fn package_section(value: Option<Value>) -> InputResult<Vec<Package>> {
    const SECTION: &str = "packages";
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let r = record::<PackageRecord>(item, SECTION, format!("#{i}"))?;
                Ok(Package {
                    id:          r.id,
                    warehouse:   r.warehouse,
                    destination: r.destination,
                })
            })
            .collect(),
        Some(_) => Err(InputError::InvalidSection {
            section:  SECTION,
            expected: "a list of {id, warehouse, destination} records",
        }),
    }
}

/// Deserialize one record, turning serde's "missing field" into
/// [`InputError::MissingField`].
fn record<T: DeserializeOwned>(value: Value, section: &'static str, record: String) -> InputResult<T> {
    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        match missing_field_name(&message) {
            Some(field) => InputError::MissingField {
                section,
                record,
                field: field.to_owned(),
            },
            None => InputError::InvalidRecord { section, record, message },
        }
    })
}

/// Field name from serde's "missing field" message.  Relies on serde's
/// wording; the `missing_*` loader tests cover every record type.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}
