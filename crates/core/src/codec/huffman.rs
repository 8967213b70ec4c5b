//! Codage de Huffman adaptatif sur l'alphabet des octets
//!
//! Les fréquences sont comptées sur l'entrée complète, l'arbre est
//! construit avec un tas-min dont les égalités de fréquence sont
//! départagées par un compteur d'insertion (construction déterministe).
//! Le flux binaire obtenu est bourré à une longueur paire puis converti
//! en nucléotides par paires de bits.

use crate::error::{GeneCoderError, Result};
use crate::sequence::Nucleotide;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Table de Huffman: octet → code binaire sous forme de chaîne de '0'/'1'
///
/// `BTreeMap` pour une sérialisation JSON stable dans l'en-tête FASTA.
pub type HuffmanTable = std::collections::BTreeMap<u8, String>;

/// Noeud de l'arbre de Huffman
#[derive(Debug)]
enum HuffmanNode {
    Leaf { byte: u8 },
    Internal { left: Box<HuffmanNode>, right: Box<HuffmanNode> },
}

/// Entrée du tas: la fréquence prime, le compteur d'insertion départage
#[derive(Debug)]
struct HeapEntry {
    frequency: u64,
    order: u64,
    node: HuffmanNode,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverser l'ordre pour que BinaryHeap soit un tas-min
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for HeapEntry {}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.order == other.order
    }
}

/// Compte les fréquences de chaque octet
fn calculate_frequencies(data: &[u8]) -> [u64; 256] {
    let mut frequencies = [0u64; 256];
    for &byte in data {
        frequencies[byte as usize] += 1;
    }
    frequencies
}

/// Construit la table des codes depuis les fréquences
///
/// Cas particulier: un seul octet distinct reçoit le code `"0"` (jamais
/// un code vide).
pub fn build_table(data: &[u8]) -> HuffmanTable {
    if data.is_empty() {
        return HuffmanTable::new();
    }

    let frequencies = calculate_frequencies(data);

    let mut heap = BinaryHeap::new();
    let mut order = 0u64;
    for (byte, &freq) in frequencies.iter().enumerate() {
        if freq > 0 {
            heap.push(HeapEntry {
                frequency: freq,
                order,
                node: HuffmanNode::Leaf { byte: byte as u8 },
            });
            order += 1;
        }
    }

    // Un seul octet distinct: arbre dégénéré, code forcé à "0"
    if heap.len() == 1 {
        let entry = heap.pop().expect("tas non vide");
        let mut table = HuffmanTable::new();
        if let HuffmanNode::Leaf { byte } = entry.node {
            table.insert(byte, "0".to_string());
        }
        return table;
    }

    // Combiner les deux noeuds de plus basse fréquence jusqu'à la racine
    while heap.len() > 1 {
        let left = heap.pop().expect("tas non vide");
        let right = heap.pop().expect("tas non vide");

        heap.push(HeapEntry {
            frequency: left.frequency + right.frequency,
            order,
            node: HuffmanNode::Internal {
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        });
        order += 1;
    }

    let root = heap.pop().expect("tas non vide").node;

    let mut table = HuffmanTable::new();
    collect_codes(&root, String::new(), &mut table);
    table
}

/// Parcourt l'arbre en accumulant les codes (gauche='0', droite='1')
fn collect_codes(node: &HuffmanNode, code: String, table: &mut HuffmanTable) {
    match node {
        HuffmanNode::Leaf { byte } => {
            table.insert(*byte, code);
        }
        HuffmanNode::Internal { left, right } => {
            collect_codes(left, format!("{}0", code), table);
            collect_codes(right, format!("{}1", code), table);
        }
    }
}

/// Encode des octets en séquence ADN via Huffman
///
/// Retourne la séquence, la table et le nombre de bits de bourrage
/// ajoutés pour atteindre une longueur paire (0 ou 1 en pratique).
pub fn encode(data: &[u8]) -> (String, HuffmanTable, u8) {
    if data.is_empty() {
        return (String::new(), HuffmanTable::new(), 0);
    }

    let table = build_table(data);

    let mut bits = String::new();
    for &byte in data {
        // La table couvre par construction tous les octets de l'entrée
        bits.push_str(&table[&byte]);
    }

    let padding = ((2 - bits.len() % 2) % 2) as u8;
    for _ in 0..padding {
        bits.push('0');
    }

    let mut dna = String::with_capacity(bits.len() / 2);
    let bit_bytes = bits.as_bytes();
    for pair in bit_bytes.chunks(2) {
        let hi = pair[0] - b'0';
        let lo = pair[1] - b'0';
        dna.push(Nucleotide::from_bits((hi << 1) | lo).as_char());
    }

    (dna, table, padding)
}

/// Décode une séquence ADN encodée via Huffman
///
/// La séquence est reconvertie en flux binaire, le bourrage terminal est
/// retiré, puis le flux est consommé gloutonnement contre la table. Un
/// flux ne s'arrêtant pas sur une frontière de code est une erreur.
pub fn decode(dna: &str, table: &HuffmanTable, padding: u8) -> Result<Vec<u8>> {
    if dna.is_empty() && table.is_empty() && padding == 0 {
        return Ok(Vec::new());
    }

    let mut bits = String::with_capacity(dna.chars().count() * 2);
    for c in dna.chars() {
        let value = Nucleotide::from_char(c)?.to_bits();
        bits.push(if value & 0b10 != 0 { '1' } else { '0' });
        bits.push(if value & 0b01 != 0 { '1' } else { '0' });
    }

    if padding as usize > bits.len() {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "bourrage annoncé de {} bits mais seulement {} bits disponibles",
            padding,
            bits.len()
        )));
    }
    bits.truncate(bits.len() - padding as usize);

    // Inverser la table: code → octet
    let inverted: HashMap<&str, u8> = table.iter().map(|(&b, code)| (code.as_str(), b)).collect();

    let mut decoded = Vec::new();
    let mut start = 0;
    for end in 1..=bits.len() {
        if let Some(&byte) = inverted.get(&bits[start..end]) {
            decoded.push(byte);
            start = end;
        }
    }

    if start != bits.len() {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "bits résiduels '{}' sans frontière de code Huffman",
            &bits[start..]
        )));
    }

    Ok(decoded)
}
