//! The ten levels, in teaching order.

use algo_graph::{BlockTag, OperatorKind};
use algo_types::DeclaredType;

use crate::level::Level;

pub const LEVEL_COUNT: usize = 10;

// ── Palette shorthands ────────────────────────────────────────────────────────

const DECLARE: BlockTag = BlockTag::Declare;
const ASSIGN: BlockTag = BlockTag::Assign;
const READ: BlockTag = BlockTag::Read;
const WRITE: BlockTag = BlockTag::Write;
const DISPLAY: BlockTag = BlockTag::Display;
const IF: BlockTag = BlockTag::If;
const IF_ELSE: BlockTag = BlockTag::IfElse;
const WHILE: BlockTag = BlockTag::While;
const FOR: BlockTag = BlockTag::For;
const FUNCTION: BlockTag = BlockTag::Function;
const CALL: BlockTag = BlockTag::Call;
const RETURN: BlockTag = BlockTag::Return;

const INTEGER: BlockTag = BlockTag::Literal(DeclaredType::Integer);
const REAL: BlockTag = BlockTag::Literal(DeclaredType::Real);
const TEXT: BlockTag = BlockTag::Literal(DeclaredType::Text);
const BOOLEAN: BlockTag = BlockTag::Literal(DeclaredType::Boolean);

const ADD: BlockTag = BlockTag::Operator(OperatorKind::Addition);
const SUB: BlockTag = BlockTag::Operator(OperatorKind::Subtraction);
const MUL: BlockTag = BlockTag::Operator(OperatorKind::Multiplication);
const DIV: BlockTag = BlockTag::Operator(OperatorKind::Division);
const EQ: BlockTag = BlockTag::Operator(OperatorKind::Equal);
const NE: BlockTag = BlockTag::Operator(OperatorKind::NotEqual);
const LT: BlockTag = BlockTag::Operator(OperatorKind::Less);
const GT: BlockTag = BlockTag::Operator(OperatorKind::Greater);
const LE: BlockTag = BlockTag::Operator(OperatorKind::LessEqual);
const GE: BlockTag = BlockTag::Operator(OperatorKind::GreaterEqual);
const AND: BlockTag = BlockTag::Operator(OperatorKind::And);
const OR: BlockTag = BlockTag::Operator(OperatorKind::Or);
const NOT: BlockTag = BlockTag::Operator(OperatorKind::Not);

// ══════════════════════════════════════════════════════════════════════════════
// Levels
// ══════════════════════════════════════════════════════════════════════════════

static LEVELS: [Level; LEVEL_COUNT] = [
    Level {
        number: 1,
        title: "Introduction aux Algorithmes",
        description: "Découvrez les concepts de base des algorithmes avec des opérations simples d'entrée et de sortie.",
        objectives: &[
            "Utiliser un bloc 'Lire variable'",
            "Utiliser un bloc 'Afficher message'",
            "L'algorithme doit lire une valeur et l'afficher",
        ],
        hint: "Commencez par déclarer la variable, puis utilisez un bloc 'Lire variable' suivi d'un bloc 'Afficher message'.",
        // `read` needs a declared variable, so the palette offers `declare` too.
        allowed: &[DECLARE, READ, WRITE, DISPLAY, INTEGER, TEXT],
        required: &[READ, DISPLAY],
        max_blocks: 5,
    },
    Level {
        number: 2,
        title: "Variables et Affectation",
        description: "Apprenez à déclarer des variables et à leur affecter des valeurs.",
        objectives: &[
            "Déclarer une variable de type 'entier'",
            "Affecter la valeur 10 à cette variable",
            "Afficher la valeur de la variable",
        ],
        hint: "Utilisez 'Déclarer variable' puis 'Affecter valeur' pour manipuler les données.",
        allowed: &[DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, REAL, TEXT, BOOLEAN],
        required: &[DECLARE, ASSIGN, DISPLAY],
        max_blocks: 8,
    },
    Level {
        number: 3,
        title: "Opérations Arithmétiques",
        description: "Maîtrisez les opérations de base : addition, soustraction, multiplication et division.",
        objectives: &[
            "Déclarer deux variables entières (A et B)",
            "Affecter des valeurs à A et B (ex: A=5, B=3)",
            "Calculer A + B et stocker le résultat dans une troisième variable (Somme)",
            "Afficher la valeur de Somme",
        ],
        hint: "Combinez les opérateurs avec des variables pour créer des expressions mathématiques.",
        allowed: &[DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, REAL, ADD, SUB, MUL, DIV],
        required: &[DECLARE, ASSIGN, ADD, DISPLAY],
        max_blocks: 10,
    },
    Level {
        number: 4,
        title: "Structures Conditionnelles - Si",
        description: "Introduisez la logique conditionnelle avec les structures 'Si'.",
        objectives: &[
            "Déclarer une variable 'nombre'",
            "Lire une valeur pour 'nombre'",
            "Utiliser un bloc 'Si' pour vérifier si 'nombre' est supérieur à 10",
            "Si vrai, afficher 'Le nombre est grand'",
        ],
        hint: "Utilisez les opérateurs de comparaison (==, <, >) pour créer des conditions.",
        allowed: &[DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, REAL, IF, EQ, NE, LT, GT],
        required: &[DECLARE, READ, IF, DISPLAY],
        max_blocks: 12,
    },
    Level {
        number: 5,
        title: "Structures Conditionnelles - Si...Sinon",
        description: "Approfondissez les conditions avec la structure complète Si...Sinon.",
        objectives: &[
            "Déclarer une variable 'age'",
            "Lire une valeur pour 'age'",
            "Utiliser un bloc 'Si...Sinon' pour vérifier si 'age' est supérieur ou égal à 18",
            "Si vrai, afficher 'Majeur'",
            "Si faux, afficher 'Mineur'",
        ],
        hint: "Le bloc 'Sinon' s'exécute quand la condition du 'Si' est fausse.",
        allowed: &[
            DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, REAL, IF_ELSE, EQ, NE, LT, GT, LE, GE,
        ],
        required: &[DECLARE, READ, IF_ELSE, DISPLAY],
        max_blocks: 15,
    },
    Level {
        number: 6,
        title: "Opérateurs Logiques",
        description: "Découvrez les opérateurs logiques ET, OU et NON pour des conditions complexes.",
        objectives: &[
            "Déclarer deux variables booléennes (A et B)",
            "Affecter des valeurs à A et B",
            "Utiliser l'opérateur ET pour vérifier si A ET B sont vrais",
            "Utiliser l'opérateur OU pour vérifier si A OU B est vrai",
            "Utiliser l'opérateur NON pour inverser une valeur booléenne",
            "Afficher les résultats de ces opérations",
        ],
        hint: "ET nécessite que toutes les conditions soient vraies, OU nécessite qu'au moins une soit vraie.",
        allowed: &[
            DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, REAL, BOOLEAN, IF_ELSE, EQ, NE, LT, GT,
            AND, OR, NOT,
        ],
        required: &[AND, OR, NOT, DISPLAY],
        max_blocks: 18,
    },
    Level {
        number: 7,
        title: "Boucles - Pour",
        description: "Introduisez les boucles avec la structure 'Pour' pour répéter des actions.",
        objectives: &[
            "Utiliser un bloc 'Pour' pour répéter 5 fois une action",
            "À chaque itération, afficher le numéro de l'itération (compteur)",
            "Le compteur doit aller de 1 à 5",
        ],
        hint: "La boucle 'Pour' répète un bloc d'instructions un nombre défini de fois.",
        allowed: &[DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, FOR, ADD, MUL],
        required: &[FOR, DISPLAY],
        max_blocks: 12,
    },
    Level {
        number: 8,
        title: "Boucles - Tant Que",
        description: "Maîtrisez les boucles conditionnelles avec 'Tant Que'.",
        objectives: &[
            "Déclarer une variable 'compteur' initialisée à 0",
            "Utiliser un bloc 'Tant que' pour répéter tant que 'compteur' est inférieur à 3",
            "À chaque itération, incrémenter 'compteur'",
            "Afficher la valeur de 'compteur' à chaque itération",
        ],
        hint: "Assurez-vous de modifier la variable de condition à l'intérieur de la boucle.",
        allowed: &[DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, WHILE, LT, ADD, SUB],
        required: &[DECLARE, ASSIGN, WHILE, DISPLAY],
        max_blocks: 15,
    },
    Level {
        number: 9,
        title: "Algorithmes de Calcul",
        description: "Créez des algorithmes plus complexes combinant variables, conditions et boucles.",
        objectives: &[
            "Calculer la somme des nombres de 1 à 5 en utilisant une boucle 'Pour'",
            "Stocker le résultat dans une variable 'sommeTotale'",
            "Afficher la 'sommeTotale' à la fin (qui doit être 15)",
        ],
        hint: "Utilisez une variable pour accumuler les résultats dans la boucle.",
        allowed: &[
            DECLARE, ASSIGN, READ, WRITE, DISPLAY, INTEGER, REAL, FOR, WHILE, IF_ELSE, ADD, MUL, GT,
            LT,
        ],
        required: &[DECLARE, ASSIGN, FOR, ADD, DISPLAY],
        max_blocks: 20,
    },
    Level {
        number: 10,
        title: "Fonctions et Procédures",
        description: "Découvrez la modularité avec les fonctions et procédures.",
        objectives: &[
            "Créer une fonction nommée 'additionner' qui prend deux paramètres (a, b)",
            "La fonction doit retourner la somme de a et b",
            "Appeler cette fonction avec des valeurs (ex: 5 et 7)",
            "Afficher le résultat de l'appel de fonction (qui doit être 12)",
        ],
        hint: "Une fonction retourne une valeur, une procédure effectue des actions sans retour.",
        allowed: &[FUNCTION, CALL, RETURN, DECLARE, ASSIGN, DISPLAY, INTEGER, REAL, ADD, MUL],
        required: &[FUNCTION, CALL, RETURN, DISPLAY],
        max_blocks: 25,
    },
];

/// Every level, in teaching order.
pub fn levels() -> &'static [Level] {
    &LEVELS
}

/// Level `number`, counting from 1.
pub fn level(number: u8) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_numbered_in_order() {
        for (i, level) in levels().iter().enumerate() {
            assert_eq!(usize::from(level.number), i + 1);
        }
        assert!(level(0).is_none());
        assert!(level(11).is_none());
    }

    #[test]
    fn test_required_blocks_are_allowed() {
        for level in levels() {
            for tag in level.required {
                assert!(
                    level.allows(*tag),
                    "level {}: {tag} required but not offered",
                    level.number
                );
            }
        }
    }
}
