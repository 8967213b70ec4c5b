//! Descripteur de pipeline sérialisé dans l'en-tête FASTA
//!
//! Le descripteur enregistre chaque paramètre nécessaire pour inverser
//! exactement la chaîne d'encodage: méthode primaire, table de Huffman,
//! contraintes GC, parité, couche FEC. Il est rendu sous forme de jetons
//! `clé=valeur` séparés par des espaces; les clés inconnues sont
//! ignorées au parsing.

use crate::codec::huffman::HuffmanTable;
use crate::codec::reed_solomon::RS_BLOCK_SIZE;
use crate::error::{GeneCoderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encodeur primaire octets → nucléotides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Base4Direct,
    Huffman,
    GcBalanced,
}

impl Method {
    /// Nom de la méthode dans l'en-tête
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Base4Direct => "base4_direct",
            Method::Huffman => "huffman",
            Method::GcBalanced => "gc_balanced",
        }
    }

    /// Parse un nom de méthode
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "base4_direct" => Ok(Method::Base4Direct),
            "huffman" => Ok(Method::Huffman),
            "gc_balanced" => Ok(Method::GcBalanced),
            other => Err(GeneCoderError::InvalidHeader(format!(
                "méthode d'encodage inconnue '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Couche de correction d'erreurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecScheme {
    None,
    TripleRepeat,
    #[serde(rename = "hamming_7_4")]
    Hamming74,
    ReedSolomon,
}

impl FecScheme {
    /// Nom du schéma dans l'en-tête
    pub fn as_str(self) -> &'static str {
        match self {
            FecScheme::None => "none",
            FecScheme::TripleRepeat => "triple_repeat",
            FecScheme::Hamming74 => "hamming_7_4",
            FecScheme::ReedSolomon => "reed_solomon",
        }
    }

    /// Parse un nom de schéma FEC
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "none" => Ok(FecScheme::None),
            "triple_repeat" => Ok(FecScheme::TripleRepeat),
            "hamming_7_4" => Ok(FecScheme::Hamming74),
            "reed_solomon" => Ok(FecScheme::ReedSolomon),
            other => Err(GeneCoderError::InvalidHeader(format!(
                "schéma FEC inconnu '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FecScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Règle de calcul du nucléotide de parité
///
/// Une seule règle existe; toute autre valeur d'en-tête est rejetée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParityRule {
    #[serde(rename = "GC_even_A_odd_T")]
    GcEvenAOddT,
}

impl ParityRule {
    /// Nom de la règle dans l'en-tête
    pub fn as_str(self) -> &'static str {
        match self {
            ParityRule::GcEvenAOddT => "GC_even_A_odd_T",
        }
    }

    /// Parse un nom de règle
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "GC_even_A_odd_T" => Ok(ParityRule::GcEvenAOddT),
            other => Err(GeneCoderError::InvalidHeader(format!(
                "règle de parité inconnue '{}'",
                other
            ))),
        }
    }
}

/// Descripteur complet d'un pipeline d'encodage
///
/// Un descripteur valide et une séquence non corrompue suffisent à
/// restituer les octets d'origine à l'identique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDescriptor {
    /// Encodeur primaire
    pub method: Method,
    /// Nom du fichier d'origine (provenance uniquement)
    pub original_filename: String,
    /// Table de Huffman (méthode huffman uniquement)
    pub huffman_table: Option<HuffmanTable>,
    /// Bits de bourrage du flux Huffman (0-7)
    pub huffman_padding: Option<u8>,
    /// Ratio GC minimum (méthode gc_balanced uniquement)
    pub gc_min: Option<f64>,
    /// Ratio GC maximum (méthode gc_balanced uniquement)
    pub gc_max: Option<f64>,
    /// Longueur max d'homopolymère (méthode gc_balanced uniquement)
    pub max_homopolymer: Option<usize>,
    /// Couche de parité présente
    pub add_parity: bool,
    /// Règle de parité (si couche présente)
    pub parity_rule: Option<ParityRule>,
    /// Couche FEC
    pub fec: FecScheme,
    /// Bits de bourrage Hamming (0-7, Hamming uniquement)
    pub fec_padding_bits: Option<u8>,
    /// Symboles de parité Reed-Solomon (RS uniquement)
    pub fec_nsym: Option<usize>,
}

impl PipelineDescriptor {
    /// Crée un descripteur minimal pour une méthode donnée
    pub fn new(method: Method, original_filename: impl Into<String>) -> Self {
        Self {
            method,
            original_filename: original_filename.into(),
            huffman_table: None,
            huffman_padding: None,
            gc_min: None,
            gc_max: None,
            max_homopolymer: None,
            add_parity: false,
            parity_rule: None,
            fec: FecScheme::None,
            fec_padding_bits: None,
            fec_nsym: None,
        }
    }

    /// Rend l'en-tête sous forme de jetons `clé=valeur`
    pub fn to_header(&self) -> Result<String> {
        let mut parts = vec![format!("method={}", self.method)];
        parts.push(format!(
            "original_filename={}",
            quote_value(&self.original_filename)
        ));

        if let Some(table) = &self.huffman_table {
            // JSON compact, sans espaces, pour rester sur un seul jeton
            parts.push(format!("huffman_table={}", serde_json::to_string(table)?));
        }
        if let Some(padding) = self.huffman_padding {
            parts.push(format!("huffman_padding={}", padding));
        }

        if let Some(gc_min) = self.gc_min {
            parts.push(format!("gc_min={}", gc_min));
        }
        if let Some(gc_max) = self.gc_max {
            parts.push(format!("gc_max={}", gc_max));
        }
        if let Some(max_homopolymer) = self.max_homopolymer {
            parts.push(format!("max_homopolymer={}", max_homopolymer));
        }

        if self.add_parity {
            parts.push("add_parity=true".to_string());
            if let Some(rule) = self.parity_rule {
                parts.push(format!("parity_rule={}", rule.as_str()));
            }
        }

        parts.push(format!("fec={}", self.fec));
        if let Some(bits) = self.fec_padding_bits {
            parts.push(format!("fec_padding_bits={}", bits));
        }
        if let Some(nsym) = self.fec_nsym {
            parts.push(format!("fec_nsym={}", nsym));
        }

        Ok(parts.join(" "))
    }

    /// Parse un en-tête `clé=valeur`
    ///
    /// Les clés inconnues sont ignorées; les champs requis pour la
    /// méthode indiquée doivent être présents et cohérents.
    pub fn parse_header(header: &str) -> Result<Self> {
        let mut method: Option<Method> = None;
        let mut descriptor = PipelineDescriptor::new(Method::Base4Direct, "");

        for token in tokenize_header(header) {
            let Some((key, value)) = token.split_once('=') else {
                // Jeton libre (description, commentaire): ignoré
                continue;
            };

            match key {
                "method" => method = Some(Method::parse(value)?),
                "original_filename" => descriptor.original_filename = unquote_value(value)?,
                "huffman_table" => {
                    let table = serde_json::from_str(value).map_err(|e| {
                        GeneCoderError::InvalidHeader(format!("table de Huffman illisible: {}", e))
                    })?;
                    descriptor.huffman_table = Some(table);
                }
                "huffman_padding" => {
                    descriptor.huffman_padding = Some(parse_padding(key, value)?);
                }
                "gc_min" => descriptor.gc_min = Some(parse_float(key, value)?),
                "gc_max" => descriptor.gc_max = Some(parse_float(key, value)?),
                "max_homopolymer" => {
                    descriptor.max_homopolymer = Some(parse_integer(key, value)?);
                }
                "add_parity" => {
                    descriptor.add_parity = match value {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(GeneCoderError::InvalidHeader(format!(
                                "valeur booléenne invalide '{}' pour add_parity",
                                other
                            )))
                        }
                    };
                }
                "parity_rule" => descriptor.parity_rule = Some(ParityRule::parse(value)?),
                "fec" => descriptor.fec = FecScheme::parse(value)?,
                "fec_padding_bits" => {
                    descriptor.fec_padding_bits = Some(parse_padding(key, value)?);
                }
                "fec_nsym" => descriptor.fec_nsym = Some(parse_integer(key, value)?),
                // Tolérance: clé inconnue ignorée
                _ => {}
            }
        }

        descriptor.method = method.ok_or_else(|| {
            GeneCoderError::InvalidHeader("champ 'method' absent de l'en-tête".to_string())
        })?;

        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Vérifie la cohérence interne du descripteur
    pub fn validate(&self) -> Result<()> {
        match self.method {
            Method::Huffman => {
                if self.huffman_table.is_none() {
                    return Err(GeneCoderError::InvalidHeader(
                        "champ 'huffman_table' requis pour la méthode huffman".to_string(),
                    ));
                }
                if self.huffman_padding.is_none() {
                    return Err(GeneCoderError::InvalidHeader(
                        "champ 'huffman_padding' requis pour la méthode huffman".to_string(),
                    ));
                }
            }
            Method::GcBalanced => {
                let (Some(gc_min), Some(gc_max), Some(max_homopolymer)) =
                    (self.gc_min, self.gc_max, self.max_homopolymer)
                else {
                    return Err(GeneCoderError::InvalidHeader(
                        "champs 'gc_min', 'gc_max' et 'max_homopolymer' requis pour la \
                         méthode gc_balanced"
                            .to_string(),
                    ));
                };

                if !(0.0..=1.0).contains(&gc_min)
                    || !(0.0..=1.0).contains(&gc_max)
                    || gc_min > gc_max
                {
                    return Err(GeneCoderError::InvalidHeader(format!(
                        "plage GC incohérente: gc_min={} gc_max={}",
                        gc_min, gc_max
                    )));
                }
                if max_homopolymer < 1 {
                    return Err(GeneCoderError::InvalidHeader(
                        "max_homopolymer doit être au moins 1".to_string(),
                    ));
                }
            }
            Method::Base4Direct => {}
        }

        if self.add_parity {
            if self.fec == FecScheme::Hamming74 {
                return Err(GeneCoderError::InvalidHeader(
                    "add_parity et fec=hamming_7_4 sont mutuellement exclusifs".to_string(),
                ));
            }
            if self.method == Method::GcBalanced {
                return Err(GeneCoderError::InvalidHeader(
                    "la parité ne s'applique pas à la méthode gc_balanced".to_string(),
                ));
            }
            if self.parity_rule.is_none() {
                return Err(GeneCoderError::InvalidHeader(
                    "champ 'parity_rule' requis quand add_parity=true".to_string(),
                ));
            }
        }

        match self.fec {
            FecScheme::Hamming74 => {
                if self.fec_padding_bits.is_none() {
                    return Err(GeneCoderError::InvalidHeader(
                        "champ 'fec_padding_bits' requis pour fec=hamming_7_4".to_string(),
                    ));
                }
            }
            FecScheme::ReedSolomon => match self.fec_nsym {
                // Un bloc de 255 symboles doit garder au moins un octet
                // de données
                Some(nsym) if (1..RS_BLOCK_SIZE).contains(&nsym) => {}
                Some(nsym) => {
                    return Err(GeneCoderError::InvalidHeader(format!(
                        "fec_nsym={} hors de l'intervalle 1-{} pour fec=reed_solomon",
                        nsym,
                        RS_BLOCK_SIZE - 1
                    )));
                }
                None => {
                    return Err(GeneCoderError::InvalidHeader(
                        "champ 'fec_nsym' requis pour fec=reed_solomon".to_string(),
                    ));
                }
            },
            FecScheme::None | FecScheme::TripleRepeat => {}
        }

        Ok(())
    }
}

/// Découpe un en-tête en jetons, en respectant les valeurs entre guillemets
fn tokenize_header(header: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in header.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }

        match c {
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                current.push(c);
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Met une valeur entre guillemets si nécessaire
fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\');

    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Retire les guillemets optionnels d'une valeur
fn unquote_value(value: &str) -> Result<String> {
    if !value.starts_with('"') {
        return Ok(value.to_string());
    }

    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| {
            GeneCoderError::InvalidHeader(format!("valeur mal délimitée: {}", value))
        })?;

    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }

    Ok(out)
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    value.parse().map_err(|_| {
        GeneCoderError::InvalidHeader(format!("valeur flottante invalide '{}' pour {}", value, key))
    })
}

fn parse_integer(key: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| {
        GeneCoderError::InvalidHeader(format!("valeur entière invalide '{}' pour {}", value, key))
    })
}

fn parse_padding(key: &str, value: &str) -> Result<u8> {
    let padding: u8 = value.parse().map_err(|_| {
        GeneCoderError::InvalidHeader(format!("valeur entière invalide '{}' pour {}", value, key))
    })?;
    if padding > 7 {
        return Err(GeneCoderError::InvalidHeader(format!(
            "{}={} hors de l'intervalle 0-7",
            key, padding
        )));
    }
    Ok(padding)
}
