// src/noyau/erreur.rs
//
// Erreurs typées du noyau.
// Chaque échec reste local à un appel `evaluate` : la session affiche le message
// et ne touche ni à l’expression, ni à Ans, ni à la mémoire.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("Entrée vide")]
    EmptyExpression,

    #[error("Parenthèses non équilibrées")]
    UnbalancedParentheses,

    #[error("Factorielle mal placée")]
    InvalidFactorialUsage,

    #[error("Pourcentage mal placé")]
    InvalidPercentageUsage,

    #[error("Caractères invalides détectés")]
    InvalidCharacters,

    /// Garde le nom fautif pour le diagnostic.
    #[error("Identifiant non supporté : {0}")]
    UnsupportedIdentifier(String),

    #[error("La factorielle n’est définie que pour les entiers positifs ou nuls")]
    FactorialDomainError,

    #[error("Résultat trop grand")]
    ResultTooLarge,

    #[error("Expression invalide : {0}")]
    MalformedExpression(String),

    /// NaN ou ±∞ en sortie.
    #[error("Calcul impossible")]
    ComputationFailed,
}

pub type ResultatCalcul<T> = Result<T, ErreurCalcul>;
