//! Include/exclude rules deciding which emitted files may be preloaded.

use std::collections::BTreeSet;

use regex::Regex;
use thiserror::Error;

use crate::asset_paths::compile_glob;
use crate::models::BundleEntry;
use crate::options::ShouldPreload;

/// Errors raised while compiling selection rules.
#[derive(Debug, Error)]
pub enum SelectionError {
  /// A rule is not a valid glob.
  #[error("invalid selection pattern `{pattern}`: {source}")]
  InvalidPattern {
    /// Rule as written in the configuration.
    pattern: String,
    /// Source regex compilation error.
    #[source]
    source: regex::Error,
  },
}

/// Selection helper usable as the `should_preload` predicate.
///
/// An entry is selected when no exclude rule matches its file name and either no include
/// rules exist or one of them matches.
#[derive(Debug, Clone, Default)]
pub struct PreloadSelection {
  include: Option<Vec<Rule>>,
  exclude: Vec<Rule>,
}

#[derive(Debug, Clone)]
struct Rule {
  scope: String,
  glob: Regex,
}

impl Rule {
  fn compile(pattern: String) -> Result<Self, SelectionError> {
    let glob = compile_glob(&pattern).map_err(|source| SelectionError::InvalidPattern {
      pattern: pattern.clone(),
      source,
    })?;
    Ok(Self {
      scope: pattern,
      glob,
    })
  }

  fn matches(&self, file_name: &str) -> bool {
    self.glob.is_match(file_name) || scope_matches(&self.scope, file_name)
  }
}

impl PreloadSelection {
  /// Compile include and exclude rules.
  pub fn new(
    include: impl IntoIterator<Item = String>,
    exclude: impl IntoIterator<Item = String>,
  ) -> Result<Self, SelectionError> {
    let include = compile_rules(include)?;
    let exclude = compile_rules(exclude)?;

    Ok(Self {
      include: (!include.is_empty()).then_some(include),
      exclude,
    })
  }

  /// Determine whether an output file may receive a link.
  pub fn is_selected(&self, file_name: &str) -> bool {
    if self.exclude.iter().any(|rule| rule.matches(file_name)) {
      return false;
    }

    match &self.include {
      Some(include) => include.iter().any(|rule| rule.matches(file_name)),
      None => true,
    }
  }

  /// Returns true when no filtering rules are active.
  pub fn is_unfiltered(&self) -> bool {
    self.include.is_none() && self.exclude.is_empty()
  }
}

impl ShouldPreload for PreloadSelection {
  fn should_preload(&self, entry: &BundleEntry) -> bool {
    self.is_selected(entry.file_name())
  }
}

fn compile_rules(values: impl IntoIterator<Item = String>) -> Result<Vec<Rule>, SelectionError> {
  normalise_list(values).into_iter().map(Rule::compile).collect()
}

/// Convert raw rules into a sorted, de-duplicated set.
///
/// Values are trimmed and empty entries are discarded.
fn normalise_list(values: impl IntoIterator<Item = String>) -> BTreeSet<String> {
  values
    .into_iter()
    .map(|value| value.trim().trim_matches('/').to_string())
    .filter(|value| !value.is_empty())
    .collect()
}

fn scope_matches(rule: &str, candidate: &str) -> bool {
  candidate
    .strip_prefix(rule)
    .is_some_and(|suffix| suffix.starts_with('/'))
}
