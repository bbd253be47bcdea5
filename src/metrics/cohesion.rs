//! Method-name cohesion
//!
//! A module is cohesive when the names of its functions share a domain
//! term, e.g. `getUser`, `deleteUser`, `updateUser` all share `user`. A
//! two-token refinement of the domain term (`userCart` in
//! `getUserCart`) is a sub-domain term; functions grouped by a sub-domain
//! count against plain domain cohesion unless every domain match is one.

use tracing::{debug, warn};

use super::{finish_outcome, Metric};
use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::config::CohesionMode;
use crate::models::grade::{Boundary, GradeScale};
use crate::models::metric::{MetricKind, MetricOutcome, MetricRecord};
use crate::models::project::ProjectStructureReport;

pub const DEFAULT_SCALE: GradeScale = GradeScale::higher_is_better([
    Boundary::at_most(0.2),
    Boundary::at_most(0.4),
    Boundary::at_most(0.6),
    Boundary::at_most(0.8),
]);

/// Verb prefixes that carry no domain meaning
pub const GENERIC_PREFIXES: [&str; 8] = ["add", "get", "delete", "set", "update", "create", "fetch", "remove"];

/// Scores below this raise an issue
pub const ISSUE_THRESHOLD: f64 = 0.5;

const SUB_DOMAIN_TOKENS: usize = 2;

const SUGGESTIONS: &[&str] = &[
    "Check whether the functions follow the **Single Responsibility Principle (SRP)**, i.e. serve one topic only",
    "**Extract** unrelated functions into separate, dedicated modules or services. Every module should represent one clear domain or sub-domain",
    "**Rename functions** with consistent prefixes or naming conventions that reflect the module's domain (e.g. `getUserId` and `getUserData` instead of `getId` and `getData`)",
];

/// Cohesion of one module's function names
#[derive(Debug, Clone, PartialEq)]
pub struct NameCohesion {
    pub score: f64,
    pub issue: Option<String>,
}

/// Split a name into lower-cased words at uppercase letters and underscores
pub fn tokenize(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in name.chars() {
        if c == '_' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Tokens of `name` without generic verb prefixes
pub fn domain_tokens(name: &str) -> Vec<String> {
    tokenize(name)
        .into_iter()
        .filter(|token| !GENERIC_PREFIXES.contains(&token.as_str()))
        .collect()
}

/// Most frequent token across names, counting each token once per name
///
/// Ties go to the token seen first.
fn domain_term(tokens_per_name: &[Vec<String>]) -> Option<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for tokens in tokens_per_name {
        let mut seen: Vec<&String> = Vec::new();
        for token in tokens {
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);
            match counts.iter_mut().find(|(known, _)| known == token) {
                Some((_, count)) => *count += 1,
                None => counts.push((token.clone(), 1)),
            }
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (token, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((token, count));
        }
    }
    best
}

/// Two-token window starting at the domain term, if it differs from it
fn sub_domain_term(domain: &str, tokens: &[String]) -> Option<String> {
    let index = tokens.iter().position(|token| token == domain)?;
    let end = (index + SUB_DOMAIN_TOKENS).min(tokens.len());
    let term = tokens[index..end].concat();
    if term == domain {
        return None;
    }
    Some(term)
}

fn normalized(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}

/// Cohesion score from the domain and dominant sub-domain counts
pub fn cohesion_score(mode: CohesionMode, callables: usize, domain_count: usize, sub_domain_count: usize) -> f64 {
    if domain_count > 0 && domain_count == sub_domain_count {
        return 1.0;
    }
    let plain = domain_count.saturating_sub(sub_domain_count) as f64;
    let total = callables as f64;
    match mode {
        CohesionMode::Strict => plain / total,
        CohesionMode::Lenient => (plain + 0.5 * sub_domain_count as f64) / total,
    }
}

/// Score the function names of a single module
pub fn name_cohesion(names: &[String], mode: CohesionMode) -> NameCohesion {
    if names.len() <= 1 {
        return NameCohesion {
            score: 1.0,
            issue: None,
        };
    }

    let tokens_per_name: Vec<Vec<String>> = names.iter().map(|name| domain_tokens(name)).collect();
    let domain = match domain_term(&tokens_per_name) {
        Some((term, count)) if count >= 2 => (term, count),
        _ => {
            return NameCohesion {
                score: 0.0,
                issue: Some("No common domain could be found for this module, so it is not cohesive".to_string()),
            }
        }
    };

    // distinct sub-domain terms in first-seen order
    let mut sub_domains: Vec<String> = Vec::new();
    for tokens in &tokens_per_name {
        if let Some(term) = sub_domain_term(&domain.0, tokens) {
            if !sub_domains.contains(&term) {
                sub_domains.push(term);
            }
        }
    }

    let normalized_names: Vec<String> = names.iter().map(|name| normalized(name)).collect();
    let mut sub_domain: Option<(String, usize)> = None;
    for term in sub_domains {
        let count = normalized_names.iter().filter(|name| name.contains(&term)).count();
        if sub_domain.as_ref().map_or(true, |(_, top)| count > *top) {
            sub_domain = Some((term, count));
        }
    }
    debug!("domain {:?}, sub-domain {:?}", domain, sub_domain);

    let sub_domain_count = sub_domain.as_ref().map_or(0, |(_, count)| *count);
    let score = cohesion_score(mode, names.len(), domain.1, sub_domain_count);
    if score >= ISSUE_THRESHOLD {
        return NameCohesion { score, issue: None };
    }

    let unrelated: Vec<&str> = names
        .iter()
        .zip(&normalized_names)
        .filter(|(_, name)| {
            !name.contains(&domain.0)
                && !sub_domain.as_ref().is_some_and(|(term, _)| name.contains(term.as_str()))
        })
        .map(|(original, _)| original.as_str())
        .collect();
    let sub_domain_text = sub_domain
        .as_ref()
        .map_or_else(|| "none found".to_string(), |(term, _)| format!("\"{}\"", term));

    NameCohesion {
        score,
        issue: Some(format!(
            "Cohesion is reduced by functions matching neither the domain (\"{}\") nor the sub-domain ({}): {}",
            domain.0,
            sub_domain_text,
            unrelated.join(", ")
        )),
    }
}

pub struct MethodNameCohesion {
    mode: CohesionMode,
    scale: GradeScale,
    outcome: MetricOutcome,
}

impl MethodNameCohesion {
    pub fn new(mode: CohesionMode) -> Self {
        Self {
            mode,
            scale: DEFAULT_SCALE,
            outcome: MetricOutcome::default(),
        }
    }

    pub fn with_scale(mut self, scale: GradeScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn mode(&self) -> CohesionMode {
        self.mode
    }
}

impl Default for MethodNameCohesion {
    fn default() -> Self {
        Self::new(CohesionMode::default())
    }
}

impl Metric for MethodNameCohesion {
    fn kind(&self) -> MetricKind {
        MetricKind::Cohesion
    }

    fn name(&self) -> &str {
        "Method Name Cohesion"
    }

    fn description(&self) -> &str {
        "Measures the functional cohesion of a module from the semantic similarity of its function names: do they share a domain term and, where present, a sub-domain term? High similarity points to a focus on a **single responsibility**."
    }

    fn scale(&self) -> &GradeScale {
        &self.scale
    }

    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()> {
        debug!("calculating method name cohesion ({})", self.mode);
        let mut outcome = MetricOutcome::default();
        let mut module_scores = Vec::new();

        for (path, name) in report.modules() {
            let analysis = loader.load_or_empty(path);
            if analysis.callables.is_empty() {
                warn!("cohesion: {} has no callables, skipped", path.display());
                continue;
            }
            let names: Vec<String> = analysis.callables.iter().map(|c| c.name.clone()).collect();

            let cohesion = name_cohesion(&names, self.mode);
            let grade = self.scale.interpret(cohesion.score);
            debug!("cohesion: {} scored {:.2} ({})", path.display(), cohesion.score, grade);

            let record = MetricRecord::new(path, name, cohesion.score, grade);
            if let Some(issue) = cohesion.issue {
                outcome.issues.push(record.clone().with_details(issue));
            }
            outcome.details.push(record);
            module_scores.push(cohesion.score);
        }

        finish_outcome(&mut outcome, &self.scale, &module_scores);
        self.outcome = outcome;
        Ok(())
    }

    fn outcome(&self) -> &MetricOutcome {
        &self.outcome
    }

    fn suggestions(&self) -> &[&'static str] {
        SUGGESTIONS
    }
}
