//! Objective validators, one per level.
//!
//! A validator combines structural checks (the expected blocks are placed
//! with the expected properties) with behavioural ones (final variable
//! values, console lines, replays with synthetic inputs). Validators never
//! touch the live graph: replays run on a private copy.

use algo_engine::{simulate, ConsoleLine, EngineConfig, RunReport};
use algo_eval::VariableStore;
use algo_graph::{Block, BlockId, BlockKind, BlockTag, ProgramGraph};
use algo_lexer::{Lexer, TokenKind};
use algo_types::{DeclaredType, Value};
use log::debug;
use serde::{Deserialize, Serialize};

/// Step bound for replays, so an endless loop fails the level instead of
/// hanging the validator.
pub const SIMULATION_STEP_LIMIT: u64 = 10_000;

/// Whether a level was passed, and what to tell the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub message: String,
}

impl ValidationOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// What a validator looks at: the learner's graph and the result of their
/// last run.
#[derive(Debug, Clone, Copy)]
pub struct Attempt<'a> {
    pub graph: &'a ProgramGraph,
    pub console: &'a [ConsoleLine],
    pub variables: &'a VariableStore,
}

impl<'a> Attempt<'a> {
    pub fn new(
        graph: &'a ProgramGraph,
        console: &'a [ConsoleLine],
        variables: &'a VariableStore,
    ) -> Self {
        Self {
            graph,
            console,
            variables,
        }
    }

    /// The graph together with the console and final variables of `report`.
    pub fn from_report(graph: &'a ProgramGraph, report: &'a RunReport) -> Self {
        Self::new(graph, &report.console, &report.variables)
    }

    // ── Structure ─────────────────────────────────────────────────────────────

    /// First block, in creation order, whose kind satisfies `pred`.
    fn find(&self, pred: impl Fn(&BlockKind) -> bool) -> Option<&'a Block> {
        self.graph.blocks().find(|b| pred(&b.kind))
    }

    fn has(&self, pred: impl Fn(&BlockKind) -> bool) -> bool {
        self.find(pred).is_some()
    }

    fn has_tag(&self, tag: BlockTag) -> bool {
        self.graph.blocks().any(|b| b.tag() == tag)
    }

    fn tag_of(&self, id: BlockId) -> Option<BlockTag> {
        self.graph.block(id).map(Block::tag)
    }

    fn declares(&self, variable: &str) -> bool {
        self.has(|k| matches!(k, BlockKind::Declare { name, .. } if name == variable))
    }

    fn reads(&self, name: &str) -> bool {
        self.has(|k| matches!(k, BlockKind::Read { variable, .. } if variable == name))
    }

    fn assigns(&self, name: &str) -> bool {
        self.has(|k| matches!(k, BlockKind::Assign { variable, .. } if variable == name))
    }

    /// Whether a `display` block shows exactly `text`, ignoring blanks.
    fn displays(&self, text: &str) -> bool {
        self.has(|k| matches!(k, BlockKind::Display { message } if message.trim() == text))
    }

    fn displays_containing(&self, text: &str) -> bool {
        self.has(|k| matches!(k, BlockKind::Display { message } if message.contains(text)))
    }

    // ── Behaviour ─────────────────────────────────────────────────────────────

    fn number(&self, name: &str) -> Option<f64> {
        match self.variables.value(name) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    fn printed(&self, value: &str) -> bool {
        shows(self.console, &format!("> {value}"))
    }

    fn failed(&self) -> bool {
        self.console.iter().any(ConsoleLine::is_error)
    }

    /// Replay the graph with `inputs` and return its console.
    fn replay(&self, inputs: &[&str]) -> Vec<ConsoleLine> {
        let config = EngineConfig::default().with_max_steps(SIMULATION_STEP_LIMIT);
        simulate(self.graph, inputs.iter().copied(), &config)
    }
}

fn shows(console: &[ConsoleLine], needle: &str) -> bool {
    console.iter().any(|line| line.text.contains(needle))
}

/// Program output lines (`> ...`), trimmed.
fn outputs(console: &[ConsoleLine]) -> Vec<&str> {
    console
        .iter()
        .map(|line| line.text.trim())
        .filter(|text| text.starts_with("> "))
        .collect()
}

/// Whether `text` is the number `n`, ignoring surrounding blanks.
fn is_number(text: &str, n: f64) -> bool {
    text.trim().parse::<f64>() == Ok(n)
}

/// Whether `expression` uses the logical operator `op`, in any spelling.
fn uses_operator(expression: &str, op: &TokenKind) -> bool {
    Lexer::new(expression)
        .lex()
        .tokens
        .iter()
        .any(|t| &t.kind == op)
}

fn format_number(n: f64) -> String {
    Value::Number(n).to_string()
}

// ══════════════════════════════════════════════════════════════════════════════
// Dispatch
// ══════════════════════════════════════════════════════════════════════════════

pub(crate) fn check(level: u8, attempt: &Attempt<'_>) -> ValidationOutcome {
    let outcome = match level {
        1 => introduction(attempt),
        2 => variables(attempt),
        3 => arithmetic(attempt),
        4 => condition(attempt),
        5 => condition_else(attempt),
        6 => logic(attempt),
        7 => for_loop(attempt),
        8 => while_loop(attempt),
        9 => accumulation(attempt),
        10 => functions(attempt),
        _ => ValidationOutcome::fail(format!("Le niveau {level} n'existe pas.")),
    };
    debug!(
        "level {level}: {}",
        if outcome.passed { "passed" } else { "failed" }
    );
    outcome
}

// ══════════════════════════════════════════════════════════════════════════════
// Levels
// ══════════════════════════════════════════════════════════════════════════════

fn introduction(attempt: &Attempt<'_>) -> ValidationOutcome {
    if !attempt.has_tag(BlockTag::Read) || !attempt.has_tag(BlockTag::Display) {
        return ValidationOutcome::fail(
            "Assurez-vous d'utiliser les blocs 'Lire variable' et 'Afficher message'.",
        );
    }

    let linked = attempt.graph.edges().iter().any(|e| {
        attempt.tag_of(e.from) == Some(BlockTag::Read)
            && attempt.tag_of(e.to) == Some(BlockTag::Display)
    });
    if !linked {
        return ValidationOutcome::fail(
            "Connectez le bloc 'Lire variable' au bloc 'Afficher message'.",
        );
    }

    let read_something = attempt.graph.blocks().any(|b| match &b.kind {
        BlockKind::Read { variable, .. } => attempt.variables.contains(variable),
        _ => false,
    });
    if read_something && !attempt.failed() && !outputs(attempt.console).is_empty() {
        ValidationOutcome::pass("L'algorithme a lu une valeur et l'a affichée correctement.")
    } else {
        ValidationOutcome::fail(
            "L'algorithme n'a pas produit les sorties attendues. Vérifiez votre logique.",
        )
    }
}

fn variables(attempt: &Attempt<'_>) -> ValidationOutcome {
    let declared = attempt.graph.blocks().find_map(|b| match &b.kind {
        BlockKind::Declare {
            name,
            declared_type: DeclaredType::Integer,
            ..
        } => Some(name.as_str()),
        _ => None,
    });
    let assigned =
        attempt.has(|k| matches!(k, BlockKind::Assign { value, .. } if value.trim() == "10"));
    let displayed = attempt.has_tag(BlockTag::Display);

    let (Some(name), true, true) = (declared, assigned, displayed) else {
        return ValidationOutcome::fail(
            "Assurez-vous d'utiliser les blocs 'Déclarer variable', 'Affecter valeur (10)' et 'Afficher message'.",
        );
    };

    if attempt.number(name) != Some(10.0) {
        return ValidationOutcome::fail(format!(
            "La variable '{name}' n'a pas la valeur attendue (10) à la fin de l'exécution."
        ));
    }
    if attempt.printed("10") {
        ValidationOutcome::pass("La variable a été déclarée, affectée et affichée correctement.")
    } else {
        ValidationOutcome::fail("La variable a été affectée, mais sa valeur n'a pas été affichée.")
    }
}

fn arithmetic(attempt: &Attempt<'_>) -> ValidationOutcome {
    let sums = attempt.has(|k| {
        matches!(k, BlockKind::Assign { variable, value }
            if variable == "Somme" && value.contains("A + B"))
    });

    let placed = attempt.declares("A")
        && attempt.declares("B")
        && attempt.declares("Somme")
        && attempt.assigns("A")
        && attempt.assigns("B")
        && sums
        && attempt.displays("Somme");
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'avoir déclaré A, B, Somme, affecté des valeurs à A et B, calculé A+B dans Somme, et affiché Somme.",
        );
    }

    let expected = attempt.number("A").zip(attempt.number("B")).map(|(a, b)| a + b);
    let Some(expected) = expected.filter(|sum| attempt.number("Somme") == Some(*sum)) else {
        let shown = expected.map_or_else(|| "A + B".to_string(), format_number);
        return ValidationOutcome::fail(format!(
            "La variable 'Somme' n'a pas la valeur attendue ({shown}) à la fin de l'exécution."
        ));
    };
    if attempt.printed(&format_number(expected)) {
        ValidationOutcome::pass("L'addition a été effectuée et affichée correctement.")
    } else {
        ValidationOutcome::fail("L'addition a été effectuée, mais le résultat n'a pas été affiché.")
    }
}

fn condition(attempt: &Attempt<'_>) -> ValidationOutcome {
    let placed = attempt.declares("nombre")
        && attempt.reads("nombre")
        && attempt.has(|k| {
            matches!(k, BlockKind::If { condition } if condition.contains("nombre > 10"))
        })
        && attempt.displays_containing("Le nombre est grand");
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'avoir déclaré 'nombre', lu sa valeur, utilisé un 'Si (nombre > 10)' et affiché 'Le nombre est grand'.",
        );
    }

    let big = shows(&attempt.replay(&["15"]), "> Le nombre est grand");
    let small = !shows(&attempt.replay(&["5"]), "> Le nombre est grand");
    if big && small {
        return ValidationOutcome::pass("Le bloc 'Si' fonctionne correctement pour les deux cas.");
    }
    let mut message = String::from("Le bloc 'Si' ne fonctionne pas comme attendu. ");
    if !big {
        message.push_str("Il n'affiche pas 'Le nombre est grand' pour un nombre > 10. ");
    }
    if !small {
        message.push_str("Il affiche 'Le nombre est grand' pour un nombre <= 10. ");
    }
    ValidationOutcome::fail(message)
}

fn condition_else(attempt: &Attempt<'_>) -> ValidationOutcome {
    let placed = attempt.declares("age")
        && attempt.reads("age")
        && attempt.has(|k| {
            matches!(k, BlockKind::IfElse { condition } if condition.contains("age >= 18"))
        })
        && attempt.displays_containing("Majeur")
        && attempt.displays_containing("Mineur");
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'avoir déclaré 'age', lu sa valeur, utilisé un 'Si...Sinon (age >= 18)', et affiché 'Majeur' et 'Mineur'.",
        );
    }

    let adult = attempt.replay(&["20"]);
    let adult = shows(&adult, "> Majeur") && !shows(&adult, "> Mineur");
    let minor = attempt.replay(&["16"]);
    let minor = shows(&minor, "> Mineur") && !shows(&minor, "> Majeur");
    if adult && minor {
        return ValidationOutcome::pass(
            "Le bloc 'Si...Sinon' fonctionne correctement pour les deux branches.",
        );
    }
    let mut message = String::from("Le bloc 'Si...Sinon' ne fonctionne pas comme attendu. ");
    if !adult {
        message.push_str("Il ne gère pas correctement l'âge >= 18. ");
    }
    if !minor {
        message.push_str("Il ne gère pas correctement l'âge < 18. ");
    }
    ValidationOutcome::fail(message)
}

fn logic(attempt: &Attempt<'_>) -> ValidationOutcome {
    let assigns_with = |op: TokenKind| {
        attempt.has(|k| matches!(k, BlockKind::Assign { value, .. } if uses_operator(value, &op)))
    };
    let placed = assigns_with(TokenKind::And)
        && assigns_with(TokenKind::Or)
        && assigns_with(TokenKind::Not)
        && attempt.has_tag(BlockTag::Display);
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'utiliser les opérateurs ET, OU, NON et d'afficher leurs résultats.",
        );
    }

    if attempt.printed("true") || attempt.printed("false") {
        ValidationOutcome::pass(
            "Les opérateurs logiques semblent être utilisés et leurs résultats affichés.",
        )
    } else {
        ValidationOutcome::fail(
            "Les résultats des opérations logiques ne sont pas clairement affichés.",
        )
    }
}

fn for_loop(attempt: &Attempt<'_>) -> ValidationOutcome {
    let counter = attempt.graph.blocks().find_map(|b| match &b.kind {
        BlockKind::For {
            counter_name,
            from,
            to,
            ..
        } if is_number(from, 1.0) && is_number(to, 5.0) => Some(counter_name.as_str()),
        _ => None,
    });
    let displays_counter = counter.is_some_and(|counter| attempt.displays(counter));
    if !displays_counter {
        return ValidationOutcome::fail(
            "Assurez-vous d'utiliser un bloc 'Pour' de 1 à 5 et d'afficher le compteur.",
        );
    }

    let printed = outputs(attempt.console);
    let all_present = (1..=5).all(|i| printed.contains(&format!("> {i}").as_str()));
    if all_present && printed.len() >= 5 {
        ValidationOutcome::pass("La boucle 'Pour' a affiché les itérations correctement.")
    } else {
        ValidationOutcome::fail(
            "La boucle 'Pour' n'a pas affiché les itérations comme attendu (1 à 5).",
        )
    }
}

fn while_loop(attempt: &Attempt<'_>) -> ValidationOutcome {
    let placed = attempt.has(|k| {
        matches!(k, BlockKind::Declare { name, initial_value, .. }
            if name == "compteur" && *initial_value == Value::Number(0.0))
    }) && attempt.has(|k| {
        matches!(k, BlockKind::While { condition } if condition.contains("compteur < 3"))
    }) && attempt.has(|k| {
        matches!(k, BlockKind::Assign { variable, value }
            if variable == "compteur" && value.contains("compteur + 1"))
    }) && attempt.displays("compteur");
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'avoir déclaré 'compteur' (0), utilisé 'Tant que (compteur < 3)', incrémenté 'compteur' et affiché 'compteur'.",
        );
    }

    let printed = outputs(attempt.console);
    let all_present = ["> 0", "> 1", "> 2"].iter().all(|line| printed.contains(line));
    if all_present && attempt.number("compteur") == Some(3.0) {
        ValidationOutcome::pass("La boucle 'Tant que' a fonctionné correctement.")
    } else {
        ValidationOutcome::fail(
            "La boucle 'Tant que' n'a pas fonctionné comme attendu. Vérifiez l'initialisation, la condition et l'incrémentation.",
        )
    }
}

fn accumulation(attempt: &Attempt<'_>) -> ValidationOutcome {
    let placed = attempt.has(|k| {
        matches!(k, BlockKind::Declare { name, initial_value, .. }
            if name == "sommeTotale" && *initial_value == Value::Number(0.0))
    }) && attempt.has(|k| {
        matches!(k, BlockKind::For { from, to, .. }
            if is_number(from, 1.0) && is_number(to, 5.0))
    }) && attempt.has(|k| {
        matches!(k, BlockKind::Assign { variable, value }
            if variable == "sommeTotale" && value.contains("sommeTotale + "))
    }) && attempt.displays("sommeTotale");
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'avoir déclaré 'sommeTotale', utilisé une boucle 'Pour' de 1 à 5, additionné au total, et affiché 'sommeTotale'.",
        );
    }

    if attempt.number("sommeTotale") != Some(15.0) {
        return ValidationOutcome::fail(
            "La variable 'sommeTotale' n'a pas la valeur attendue (15) à la fin de l'exécution.",
        );
    }
    if attempt.printed("15") {
        ValidationOutcome::pass("La somme des nombres a été calculée et affichée correctement.")
    } else {
        ValidationOutcome::fail("La somme a été calculée, mais le résultat n'a pas été affiché.")
    }
}

fn functions(attempt: &Attempt<'_>) -> ValidationOutcome {
    let placed = attempt
        .has(|k| matches!(k, BlockKind::Function { name, .. } if name == "additionner"))
        && attempt.has(|k| matches!(k, BlockKind::Return { value } if value.contains("a + b")))
        && attempt.has(|k| {
            matches!(k, BlockKind::Call { function_name, parameters }
                if function_name == "additionner" && same_arguments(parameters, "5,7"))
        })
        && attempt.displays("resultatAddition");
    if !placed {
        return ValidationOutcome::fail(
            "Assurez-vous d'avoir créé la fonction 'additionner', qu'elle retourne 'a + b', que vous l'appelez avec des paramètres, et que vous affichez le résultat.",
        );
    }

    if attempt.printed("12") {
        ValidationOutcome::pass(
            "La fonction a été définie, appelée et son résultat affiché correctement.",
        )
    } else {
        ValidationOutcome::fail("Le résultat de l'appel de fonction (12) n'a pas été affiché.")
    }
}

/// Compare comma-separated argument lists, ignoring blanks.
fn same_arguments(actual: &str, expected: &str) -> bool {
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    strip(actual) == strip(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_operator_accepts_every_spelling() {
        for expr in ["A ET B", "A et B", "A and B", "A && B"] {
            assert!(uses_operator(expr, &TokenKind::And), "{expr}");
        }
        assert!(uses_operator("NON A", &TokenKind::Not));
        assert!(uses_operator("!A", &TokenKind::Not));
        assert!(!uses_operator("ETAT", &TokenKind::And));
        assert!(!uses_operator("\"A ou B\"", &TokenKind::Or));
    }

    #[test]
    fn test_is_number_ignores_blanks() {
        assert!(is_number(" 1 ", 1.0));
        assert!(is_number("5", 5.0));
        assert!(!is_number("i", 1.0));
    }

    #[test]
    fn test_same_arguments() {
        assert!(same_arguments("5, 7", "5,7"));
        assert!(!same_arguments("7,5", "5,7"));
    }

    #[test]
    fn test_unknown_level_fails() {
        let graph = ProgramGraph::new();
        let variables = VariableStore::new();
        let outcome = check(42, &Attempt::new(&graph, &[], &variables));
        assert!(!outcome.passed);
    }
}
