pub mod asset;
pub mod init;
pub mod link;
pub mod node;
pub mod seed;

use std::path::PathBuf;

use assetcat_core_types::EditorId;
use assetcat_engine::{Catalog, EngineCommand, EngineCommandResult};
use serde::Serialize;

use crate::config::CliConfig;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open catalog plus the editor every mutation is stamped with
pub struct Context {
    pub catalog: Catalog,
    pub editor: EditorId,
    pub db_path: PathBuf,
}

impl Context {
    pub fn open(config: &CliConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            catalog: Catalog::open(&config.db_path)?,
            editor: EditorId::new(config.editor.as_str()),
            db_path: config.db_path.clone(),
        })
    }

    pub fn execute(&mut self, cmd: EngineCommand) -> Result<EngineCommandResult, Box<dyn std::error::Error>> {
        Ok(self.catalog.execute(cmd, &self.editor)?)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
