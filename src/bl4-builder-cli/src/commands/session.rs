//! Interactive builder session
//!
//! A line-oriented shell over [`WeaponBuilder`]. Every edit prints the new
//! deserialized string immediately; when reserialization is on, the string
//! is also handed to a [`Debouncer`] which prints the serial once edits
//! settle. `store` moves the latest serial into the backpack.

use crate::commands::{load_catalog, optional_value, resolve_manufacturer, resolve_weapon_type};
use crate::config::Config;
use anyhow::{Context, Result};
use bl4_builder::{
    names, Backpack, Debouncer, HttpReserializer, OutputMode, RarityPick, Reserializer,
    WeaponBuilder,
};
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const HELP: &str = "\
Commands:
  manufacturer <name|code|->   select manufacturer (resets everything)
  type <name|code|->           select weapon type (resets parts, rarity, elements)
  part <type>=<id>             set a part; slotted types fill the next free slot
  slot <type>:<index>=<id|->   set or clear one slot
  clear <type>                 clear a single-select part type
  rarity <id|legendary|->      pick a rarity category
  legendary <id|->             pick the concrete legendary
  element1 <name|->            first element
  element2 <name|->            second element (combined with the first)
  mode <strings|ids>           switch output mode
  parts | rarities | elements  list choices for the current weapon
  show                         print the current string
  store                        add the latest serial to the backpack
  backpack                     print the backpack block
  reset                        clear everything
  help | quit";

/// What the shell should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

pub struct Session<R: Rng> {
    builder: WeaponBuilder<R>,
    debouncer: Option<Debouncer>,
    latest_serial: Arc<Mutex<Option<String>>>,
    backpack: Backpack,
}

impl<R: Rng> Session<R> {
    pub fn new(builder: WeaponBuilder<R>) -> Self {
        Self {
            builder,
            debouncer: None,
            latest_serial: Arc::new(Mutex::new(None)),
            backpack: Backpack::new(),
        }
    }

    /// Send every edit through `gateway` after `quiet` of inactivity
    pub fn with_gateway<G>(mut self, gateway: G, quiet: Duration) -> Self
    where
        G: Reserializer + Send + 'static,
    {
        let latest = Arc::clone(&self.latest_serial);
        self.debouncer = Some(Debouncer::spawn(gateway, quiet, move |outcome| {
            println!("{}", outcome);
            if let Some(serial) = outcome.serial() {
                if let Ok(mut slot) = latest.lock() {
                    *slot = Some(serial.to_string());
                }
            }
        }));
        self
    }

    pub fn builder(&self) -> &WeaponBuilder<R> {
        &self.builder
    }

    pub fn backpack(&self) -> &Backpack {
        &self.backpack
    }

    /// Flush any pending reserialize call and stop the worker
    pub fn finish(&mut self) {
        if let Some(debouncer) = self.debouncer.take() {
            debouncer.shutdown();
        }
    }

    /// Run one command line
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let changed = match command.to_ascii_lowercase().as_str() {
            "" => return Ok(Reply::Lines(Vec::new())),
            "quit" | "exit" | "q" => return Ok(Reply::Quit),
            "help" | "?" => return Ok(lines([HELP.to_string()])),
            "show" => return Ok(lines([self.builder.encode()])),
            "parts" => return Ok(Reply::Lines(self.part_listing())),
            "rarities" => return Ok(Reply::Lines(self.rarity_listing())),
            "elements" => return Ok(Reply::Lines(self.element_listing())),
            "store" => return Ok(lines([self.store()])),
            "backpack" => return Ok(lines([self.backpack.render()])),

            "manufacturer" | "m" => match optional_value(rest) {
                Some(input) => {
                    let name = resolve_manufacturer(self.builder.catalog(), input)?;
                    self.builder.set_manufacturer(Some(&name))
                }
                None => self.builder.set_manufacturer(None),
            },
            "type" | "t" => {
                let manufacturer = self
                    .builder
                    .state()
                    .manufacturer()
                    .map(str::to_string)
                    .context("Select a manufacturer first")?;
                match optional_value(rest) {
                    Some(input) => {
                        let name =
                            resolve_weapon_type(self.builder.catalog(), &manufacturer, input)?;
                        self.builder.set_weapon_type(Some(&name))
                    }
                    None => self.builder.set_weapon_type(None),
                }
            }
            "part" | "p" => {
                let (part_type, id) = rest
                    .split_once('=')
                    .context("Usage: part <type>=<id>")?;
                self.builder.add_part(part_type.trim(), id.trim())
            }
            "slot" => {
                let (slot, id) = rest
                    .split_once('=')
                    .context("Usage: slot <type>:<index>=<id|->")?;
                let (part_type, index) = slot
                    .rsplit_once(':')
                    .context("Usage: slot <type>:<index>=<id|->")?;
                let index: usize = index.trim().parse().context("Slot index must be a number")?;
                self.builder
                    .set_slot_part(part_type.trim(), index, optional_value(id))
            }
            "clear" => self.builder.set_single_part(rest, None),
            "rarity" | "r" => {
                let pick = match optional_value(rest) {
                    None => None,
                    Some(value) if value.eq_ignore_ascii_case("legendary") => {
                        Some(RarityPick::Legendary)
                    }
                    Some(id) => Some(RarityPick::Regular(id)),
                };
                self.builder.set_rarity_category(pick)
            }
            "legendary" | "l" => self.builder.set_legendary_subchoice(optional_value(rest)),
            "element1" | "e1" => self.builder.set_element1(optional_value(rest)),
            "element2" | "e2" => self.builder.set_element2(optional_value(rest)),
            "mode" => {
                let mode: OutputMode = rest.parse()?;
                self.builder.set_output_mode(mode);
                true
            }
            "reset" => {
                self.builder.reset();
                true
            }
            other => {
                return Ok(lines([format!(
                    "Unknown command '{}'. Type 'help' for commands.",
                    other
                )]))
            }
        };

        if !changed {
            return Ok(lines(["Ignored (no matching choice)".to_string()]));
        }
        Ok(lines([self.publish()]))
    }

    /// Re-encode after an edit and queue the string for reserialization
    fn publish(&self) -> String {
        let encoded = self.builder.encode();
        if let Some(debouncer) = &self.debouncer {
            if self.builder.state().has_parts() {
                debouncer.submit(encoded.clone());
            }
        }
        encoded
    }

    fn store(&mut self) -> String {
        let latest = self
            .latest_serial
            .lock()
            .ok()
            .and_then(|serial| serial.clone());
        match latest {
            None => "No serial to store yet".to_string(),
            Some(serial) => match self.backpack.store(&serial) {
                Ok(slot) => format!("Stored in slot_{}", slot),
                Err(e) => format!("Error: {}", e),
            },
        }
    }

    fn part_listing(&self) -> Vec<String> {
        let mut out = Vec::new();
        for group in self.builder.part_groups() {
            match self.builder.slot_capacity(&group.part_type) {
                Some(slots) => out.push(format!("{} ({} slots)", group.part_type, slots)),
                None => out.push(group.part_type.clone()),
            }
            for part in &group.parts {
                out.push(format!(
                    "  {:>4}  {}",
                    part.id,
                    names::normalize(&part.string, part.stats())
                ));
            }
        }
        if out.is_empty() {
            out.push("Select a manufacturer and weapon type first".to_string());
        }
        out
    }

    fn rarity_listing(&self) -> Vec<String> {
        let table = self.builder.rarity_choices();
        let mut out: Vec<String> = table
            .regular
            .iter()
            .map(|r| format!("  {:>4}  {}", r.id, r.label()))
            .collect();
        if !table.legendary.is_empty() {
            out.push("  legendary:".to_string());
            out.extend(
                table
                    .legendary
                    .iter()
                    .map(|r| format!("    {:>4}  {}", r.id, r.label())),
            );
        }
        out
    }

    fn element_listing(&self) -> Vec<String> {
        match self.builder.state().elements().first_name() {
            None => vec![format!(
                "element1: {}",
                bl4_builder::BASE_ELEMENTS
                    .iter()
                    .map(|e| e.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )],
            Some(first) => vec![format!(
                "element2 (after {}): {}",
                first,
                self.builder.element2_candidates().join(", ")
            )],
        }
    }
}

impl<R: Rng> Drop for Session<R> {
    fn drop(&mut self) {
        self.finish();
    }
}

fn lines<const N: usize>(items: [String; N]) -> Reply {
    Reply::Lines(items.into_iter().collect())
}

/// Handle the session command
pub fn handle(
    catalog_dir: Option<&Path>,
    config: &Config,
    mode: Option<OutputMode>,
    offline: bool,
    endpoint: Option<String>,
    debounce_ms: Option<u64>,
) -> Result<()> {
    let catalog = load_catalog(catalog_dir)?;
    let mut builder = WeaponBuilder::new(catalog);
    builder.set_output_mode(mode.unwrap_or_else(|| config.output_mode()));

    let mut session = Session::new(builder);
    if !offline {
        let endpoint = endpoint.unwrap_or_else(|| config.endpoint().to_string());
        let quiet = debounce_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.debounce());
        tracing::info!(%endpoint, ?quiet, "reserialize enabled");
        session = session.with_gateway(HttpReserializer::new(endpoint), quiet);
    }

    println!("bl4-builder session. Type 'help' for commands.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        match session.execute(&line) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Lines(out)) => {
                for l in out {
                    println!("{}", l);
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    session.finish();
    Ok(())
}
