//! Boilerplate markers that terminate multi-line items.

/// Footer/header boilerplate found on ENGIE purchase orders.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "Item",
    "Material",
    "Descrição",
    "Solicitação",
    "ENGIE",
    "Processado por computador",
    "Emitido por",
    "Pág.",
    "Data de emissão",
    "Condições Gerais",
    "Email",
    "N°",
    "A presente Solicitação de Proposta",
    "PG.33.001.PRT",
    "disponíveis em",
    "Com a resposta a esta solicitação",
    "O nosso número fiscal de identificação",
    "as condições de entrega indicadas nesta Solicitação",
    "não carece de assinatura",
    "Name:",
    "Emitido por:",
];

/// Ordered set of case-insensitive substrings marking non-data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: Vec<String>,
    lowered: Vec<String>,
}

impl StopWords {
    /// Build a stop-word set. Blank entries are dropped, since they would
    /// match every line.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w| !w.trim().is_empty())
            .collect();
        let lowered = words.iter().map(|w| w.to_lowercase()).collect();

        Self { words, lowered }
    }

    /// A set that never matches.
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Whether `line` contains any stop word, ignoring case.
    pub fn matches(&self, line: &str) -> bool {
        if self.lowered.is_empty() {
            return false;
        }
        let line = line.to_lowercase();
        self.lowered.iter().any(|w| line.contains(w.as_str()))
    }

    /// The configured words, as given.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }
}
