//! Groups of languages an identification model confuses with a target language.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::lang::LanguageCode;
use crate::script::ScriptTables;

/// Ordered, mutually confusable languages for one target and script context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityGroup {
    key: LanguageCode,
    members: Vec<LanguageCode>,
}

impl SimilarityGroup {
    pub fn key(&self) -> &LanguageCode {
        &self.key
    }

    pub fn members(&self) -> &[LanguageCode] {
        &self.members
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.members.contains(code)
    }
}

/// Similarity groups built from configuration, plus the alias table mapping every
/// script-qualified member to its family code.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    groups: Vec<SimilarityGroup>,
    aliases: HashMap<LanguageCode, LanguageCode>,
}

impl SimilarityIndex {
    /// Build from `key → members` entries, where a key is `target` or `target_script`.
    ///
    /// Members naming a script-ambiguous family are expanded into script-qualified
    /// aliases: to the key's script when the key has one, otherwise to every variant.
    pub fn build(similar: &BTreeMap<String, Vec<String>>, scripts: &ScriptTables) -> Result<Self> {
        let mut index = Self::default();

        for (key, members) in similar {
            let key = LanguageCode::parse(key)?;
            let mut expanded: Vec<LanguageCode> = Vec::with_capacity(members.len());

            for member in members {
                let member = LanguageCode::parse(member)?;
                let variants: Vec<LanguageCode> = match scripts.variants(&member) {
                    Some(tables) if !member.is_qualified() => {
                        let key_script = key
                            .script()
                            .filter(|s| tables.iter().any(|t| t.script() == *s));
                        match key_script {
                            Some(script) => vec![LanguageCode::with_script(member.base(), script)],
                            None => tables
                                .iter()
                                .map(|t| LanguageCode::with_script(member.base(), t.script()))
                                .collect(),
                        }
                    }
                    _ => vec![member],
                };

                for code in variants {
                    if code.is_qualified() && scripts.contains(&code) {
                        index.aliases.insert(code.clone(), code.family());
                    }
                    if !expanded.contains(&code) {
                        expanded.push(code);
                    }
                }
            }

            index.groups.push(SimilarityGroup {
                key,
                members: expanded,
            });
        }

        Ok(index)
    }

    /// Groups owned by `target`, in configuration order.
    pub fn groups_for(&self, target: &LanguageCode) -> Vec<&SimilarityGroup> {
        self.groups
            .iter()
            .filter(|g| g.key.same_family(target))
            .collect()
    }

    /// Family code of a script-qualified alias.
    pub fn alias_parent(&self, code: &LanguageCode) -> Option<&LanguageCode> {
        self.aliases.get(code)
    }

    /// Collapse an alias to its family, leaving other codes untouched.
    pub fn collapse(&self, code: &LanguageCode) -> LanguageCode {
        self.alias_parent(code).cloned().unwrap_or_else(|| code.clone())
    }

    pub fn aliases(&self) -> &HashMap<LanguageCode, LanguageCode> {
        &self.aliases
    }
}
