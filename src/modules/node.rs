use crate::model::{ActionResult, Callable};
use crate::modules::{Export, ExportValue, ModuleLoader};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::SystemTime;

const HARNESS: &str = include_str!("../../assets/harness.js");

#[derive(Deserialize, Debug)]
struct DescribeReply {
    #[serde(default)]
    exports: Vec<ExportRecord>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ExportRecord {
    name: String,
    callable: bool,
    source: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CallReply {
    #[serde(default)]
    result: Option<ActionResult>,
    error: Option<String>,
}

struct Cached {
    modified: Option<SystemTime>,
    records: Vec<(String, Option<String>)>,
}

/// Evaluates definitions files with an external `node` process.
pub struct NodeModuleLoader {
    node: String,
    cache: HashMap<PathBuf, Cached>,
}

impl NodeModuleLoader {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            cache: HashMap::new(),
        }
    }

    fn describe(&self, path: &Path) -> Result<Vec<(String, Option<String>)>> {
        let stdout = run_harness(&self.node, path, "describe", None, None)?;
        let reply = parse_describe_reply(&stdout)?;
        Ok(reply
            .into_iter()
            .map(|r| (r.name, if r.callable { Some(r.source.unwrap_or_default()) } else { None }))
            .collect())
    }
}

impl ModuleLoader for NodeModuleLoader {
    fn load(&mut self, path: &Path) -> Result<Vec<Export>> {
        let path = fs::canonicalize(path)
            .with_context(|| format!("cannot resolve {}", path.display()))?;
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();

        let fresh = matches!(
            self.cache.get(&path),
            Some(cached) if cached.modified.is_some() && cached.modified == modified
        );
        if !fresh {
            debug!("NodeModuleLoader: evaluating {:?}", path);
            let records = self.describe(&path)?;
            self.cache.insert(path.clone(), Cached { modified, records });
        }

        let records = self.cache.get(&path).map(|c| c.records.clone()).unwrap_or_default();
        info!("NodeModuleLoader: {} export(s) in {:?}", records.len(), path);

        Ok(records
            .into_iter()
            .map(|(name, source)| {
                let value = match source {
                    Some(source) => ExportValue::Callable(Arc::new(NodeCallable {
                        node: self.node.clone(),
                        module: path.clone(),
                        export: name.clone(),
                        source,
                    })),
                    None => ExportValue::Value,
                };
                Export { name, value }
            })
            .collect())
    }

    fn invalidate(&mut self, path: &Path) {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.cache.remove(&key).is_some() {
            debug!("NodeModuleLoader: invalidated {:?}", key);
        }
        // A deleted file can no longer be canonicalized.
        self.cache.retain(|cached_path, _| cached_path.exists());
    }
}

pub struct NodeCallable {
    node: String,
    module: PathBuf,
    export: String,
    source: String,
}

impl Callable for NodeCallable {
    fn source(&self) -> &str {
        &self.source
    }

    fn call(&self, selection: Option<&str>) -> Result<Option<ActionResult>> {
        let input = serde_json::json!({ "selection": selection }).to_string();
        let stdout = run_harness(&self.node, &self.module, "call", Some(&self.export), Some(&input))?;
        parse_call_reply(&stdout)
    }
}

fn run_harness(
    node: &str,
    module: &Path,
    mode: &str,
    export: Option<&str>,
    input: Option<&str>,
) -> Result<String> {
    let mut command = Command::new(node);
    command
        .arg("-e")
        .arg(HARNESS)
        .env("CUSTOM_COMMANDER_MODULE", module)
        .env("CUSTOM_COMMANDER_MODE", mode)
        .env("CUSTOM_COMMANDER_EXPORT", export.unwrap_or_default())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .with_context(|| format!("failed to start '{}'", node))?;

    if let Some(mut stdin) = child.stdin.take() {
        // node stops reading once the module fails to load; its reply still matters.
        match stdin.write_all(input.unwrap_or_default().as_bytes()) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("node closed stdin early: {}", e);
            }
            result => result.context("failed to write to node")?,
        }
    }

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        debug!("node stderr: {}", stderr.trim());
    }
    if !output.status.success() {
        bail!("node exited with {}: {}", output.status, stderr.trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The reply is the last non-empty stdout line.
fn last_line(stdout: &str) -> Result<&str> {
    stdout
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| anyhow!("no reply from node"))
}

fn parse_describe_reply(stdout: &str) -> Result<Vec<ExportRecord>> {
    let reply: DescribeReply = serde_json::from_str(last_line(stdout)?)?;
    match reply.error {
        Some(error) => Err(anyhow!(error)),
        None => Ok(reply.exports),
    }
}

fn parse_call_reply(stdout: &str) -> Result<Option<ActionResult>> {
    let reply: CallReply = serde_json::from_str(last_line(stdout)?)?;
    match reply.error {
        Some(error) => Err(anyhow!(error)),
        None => Ok(reply.result),
    }
}
