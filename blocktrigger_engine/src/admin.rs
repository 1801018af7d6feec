//! Administrative commands: `reload`, `create <name>` and `update <name>`.
//!
//! `create` and `update` edit the trigger file in place with `toml_edit`, so
//! comments and layout written by hand survive. Only the fields the command
//! owns are touched.

use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;
use toml_edit::{Array, ArrayOfTables, Document, Item, Table, value};

use crate::engine::BlockTrigger;
use crate::host::{PlayerRef, SelectionSource};
use crate::loader::ConfigError;
use crate::region::{Region, Vec3i};

pub const VERBS: [&str; 3] = ["reload", "create", "update"];

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("usage: /blocktrigger reload | create <name> | update <name>")]
    Usage,
    #[error("only players can use this command")]
    NotAPlayer,
    #[error("make a region selection first")]
    NoSelection,
    #[error("trigger not found: {0}")]
    NotFound(String),
    #[error("'triggers' in {0} is not an array of tables")]
    Malformed(String),
    #[error("editing trigger config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("trigger config is not valid TOML: {0}")]
    Toml(#[from] toml_edit::TomlError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A parsed admin command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Reload,
    Create(String),
    Update(String),
}

impl AdminCommand {
    /// # Errors
    /// - if the arguments match no command
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, AdminError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            ["reload"] => Ok(Self::Reload),
            ["create", name] => Ok(Self::Create((*name).to_string())),
            ["update", name] => Ok(Self::Update((*name).to_string())),
            _ => Err(AdminError::Usage),
        }
    }
}

/// Who issued an admin command, and from which world.
#[derive(Debug, Clone)]
pub struct AdminCaller {
    pub player: PlayerRef,
    pub world: String,
}

/// Run a command and return the message to show the caller.
///
/// `caller` is `None` for the console, which may only reload.
///
/// # Errors
/// - see [`AdminError`]; the file is only left modified when the reload
///   following an `update` fails
pub fn run(
    engine: &BlockTrigger,
    caller: Option<&AdminCaller>,
    command: &AdminCommand,
    selection: &dyn SelectionSource,
) -> Result<String, AdminError> {
    match command {
        AdminCommand::Reload => reload(engine),
        AdminCommand::Create(name) => create(engine, caller.ok_or(AdminError::NotAPlayer)?, name, selection),
        AdminCommand::Update(name) => update(engine, caller.ok_or(AdminError::NotAPlayer)?, name, selection),
    }
}

/// # Errors
/// - if the trigger file cannot be loaded; the old triggers stay active
pub fn reload(engine: &BlockTrigger) -> Result<String, AdminError> {
    engine.reload()?;
    Ok("reloaded".to_string())
}

/// Write a new move trigger covering the caller's selection.
///
/// An existing trigger of the same name is overwritten field by field; fields
/// the command does not set (such as `server`) are kept. The running registry
/// is not reloaded, so the author can fill in effects first.
///
/// # Errors
/// - `NoSelection` without a selection, or on config IO/format problems
pub fn create(
    engine: &BlockTrigger,
    caller: &AdminCaller,
    name: &str,
    selection: &dyn SelectionSource,
) -> Result<String, AdminError> {
    let region = selection.selection(&caller.player).ok_or(AdminError::NoSelection)?;
    let path = &engine.config().config_path;
    let mut doc = read_document(path)?;
    let tables = trigger_tables(&mut doc, path)?;

    let index = match position_of(tables, name) {
        Some(index) => index,
        None => {
            let mut table = Table::new();
            table.insert("name", value(name));
            tables.push(table);
            tables.len() - 1
        },
    };
    let Some(table) = tables.get_mut(index) else {
        return Err(AdminError::NotFound(name.to_string()));
    };
    set_region(table, &caller.world, region);
    table.insert("type", value("move"));
    table.insert("commands", value(Array::new()));
    table.insert("console", value(Array::new()));
    table.insert("permission", value(""));
    table.insert("cooldown", value(0_i64));

    write_document(path, &doc)?;
    info!("{} created trigger {name} at {}:{region}", caller.player.name, caller.world);
    Ok(format!("Trigger created: {name}. See {}", path.display()))
}

/// Move an existing trigger to the caller's selection and reload.
///
/// # Errors
/// - `NoSelection`, `NotFound`, config IO/format problems, or a failed reload
pub fn update(
    engine: &BlockTrigger,
    caller: &AdminCaller,
    name: &str,
    selection: &dyn SelectionSource,
) -> Result<String, AdminError> {
    let region = selection.selection(&caller.player).ok_or(AdminError::NoSelection)?;
    let path = &engine.config().config_path;
    let mut doc = read_document(path)?;
    let tables = trigger_tables(&mut doc, path)?;
    let table = position_of(tables, name)
        .and_then(|index| tables.get_mut(index))
        .ok_or_else(|| AdminError::NotFound(name.to_string()))?;
    set_region(table, &caller.world, region);

    write_document(path, &doc)?;
    engine.reload()?;
    info!("{} moved trigger {name} to {}:{region}", caller.player.name, caller.world);
    Ok(format!("Trigger updated: {name}"))
}

/// Tab completion for the admin command line.
pub fn complete<S: AsRef<str>>(engine: &BlockTrigger, args: &[S]) -> Vec<String> {
    match args {
        [verb] => VERBS
            .iter()
            .filter(|v| v.starts_with(verb.as_ref()))
            .map(ToString::to_string)
            .collect(),
        [_, name] => engine
            .registry()
            .names()
            .into_iter()
            .filter(|n| n.starts_with(name.as_ref()))
            .collect(),
        _ => Vec::new(),
    }
}

fn read_document(path: &Path) -> Result<Document, AdminError> {
    if !path.exists() {
        return Ok(Document::new());
    }
    let text = fs::read_to_string(path).map_err(|source| AdminError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text.parse::<Document>()?)
}

fn write_document(path: &Path, doc: &Document) -> Result<(), AdminError> {
    fs::write(path, doc.to_string()).map_err(|source| AdminError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn trigger_tables<'a>(doc: &'a mut Document, path: &Path) -> Result<&'a mut ArrayOfTables, AdminError> {
    doc.as_table_mut()
        .entry("triggers")
        .or_insert(Item::ArrayOfTables(ArrayOfTables::new()))
        .as_array_of_tables_mut()
        .ok_or_else(|| AdminError::Malformed(path.display().to_string()))
}

fn position_of(tables: &ArrayOfTables, name: &str) -> Option<usize> {
    tables
        .iter()
        .position(|t| t.get("name").and_then(Item::as_str) == Some(name))
}

/// Point the table at `region`, dropping any point form that would shadow it.
fn set_region(table: &mut Table, world: &str, region: Region) {
    table.remove("at");
    table.insert("from", value(coords(region.min())));
    table.insert("to", value(coords(region.max())));
    table.insert("world", value(world));
}

fn coords(v: Vec3i) -> Array {
    v.to_array().into_iter().map(i64::from).collect()
}
