//! Symbol assignment for text groupings.
//!
//! Every distinct `text_true` / `text_false` list in a results file is drawn
//! in the paper as a small colored TikZ shape. The shapes come from a fixed,
//! ordered list of [`SymbolKind`]s; each kind is paired with one palette
//! color and handed out at most once per run by a [`SymbolPool`].
//!
//! [`SymbolRegistry`] sits on top of the pool. It identifies groupings by
//! content hash, so the same list of texts always resolves to the same
//! symbol, and remembers whether each grouping was first claimed as a
//! positive or a negative set for the legends.

use crate::digest::grouping_hash;
use crate::enumeration::StableEnumeration;
use crate::error::SymbolError;

/// A TikZ node shape available for groupings.
#[derive(Debug, PartialEq, Eq)]
pub struct SymbolKind {
    /// TikZ shape name, as passed to `\node[<shape>]`.
    pub shape: &'static str,
    /// LaTeX macro name, without the backslash.
    pub command: &'static str,
    /// Full TikZ node options, fill color included.
    pub properties: &'static str,
    /// Name of the `\definecolor` this symbol fills with.
    pub color_def: &'static str,
}

/// All symbol kinds, in the order they are handed out.
pub static SYMBOL_KINDS: [SymbolKind; 13] = [
    SymbolKind {
        shape: "star",
        command: "starResultSymbol",
        properties: "fill=starSymbolColor, star",
        color_def: "starSymbolColor",
    },
    SymbolKind {
        shape: "diamond",
        command: "diamondResultSymbol",
        properties: "fill=diamondSymbolColor, diamond",
        color_def: "diamondSymbolColor",
    },
    SymbolKind {
        shape: "semicircle",
        command: "semicircleResultSymbol",
        properties: "fill=semicircleSymbolColor, semicircle",
        color_def: "semicircleSymbolColor",
    },
    SymbolKind {
        shape: "trapezium",
        command: "trapeziumResultSymbol",
        properties: "fill=trapeziumSymbolColor, trapezium",
        color_def: "trapeziumSymbolColor",
    },
    SymbolKind {
        shape: "ellipse",
        command: "ellipseResultSymbol",
        properties: "fill=ellipseSymbolColor, ellipse",
        color_def: "ellipseSymbolColor",
    },
    SymbolKind {
        shape: "isosceles triangle",
        command: "isoscelestriangleResultSymbol",
        properties: "fill=isoscelestriangleSymbolColor, isosceles triangle",
        color_def: "isoscelestriangleSymbolColor",
    },
    SymbolKind {
        shape: "kite",
        command: "kiteResultSymbol",
        properties: "fill=kiteSymbolColor, kite",
        color_def: "kiteSymbolColor",
    },
    SymbolKind {
        shape: "dart",
        command: "dartResultSymbol",
        properties: "fill=dartSymbolColor, dart",
        color_def: "dartSymbolColor",
    },
    SymbolKind {
        shape: "cloud",
        command: "cloudResultSymbol",
        properties: "fill=cloudSymbolColor, cloud",
        color_def: "cloudSymbolColor",
    },
    SymbolKind {
        shape: "signal",
        command: "signalResultSymbol",
        properties: "fill=signalSymbolColor, signal",
        color_def: "signalSymbolColor",
    },
    SymbolKind {
        shape: "tape",
        command: "tapeResultSymbol",
        properties: "fill=tapeSymbolColor, tape, minimum width=1.5em, scale=0.6",
        color_def: "tapeSymbolColor",
    },
    SymbolKind {
        shape: "double arrow",
        command: "doublearrowResultSymbol",
        properties: "fill=doublearrowSymbolColor, double arrow, double arrow head extend=0.1cm, minimum height=1.1em, scale=0.7",
        color_def: "doublearrowSymbolColor",
    },
    SymbolKind {
        shape: "circle split",
        command: "circlesplitResultSymbol",
        properties: "fill=circlesplitSymbolColor, circle split",
        color_def: "circlesplitSymbolColor",
    },
];

/// A symbol kind paired with its palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// 1-based position in [`SYMBOL_KINDS`].
    pub index: usize,
    pub kind: &'static SymbolKind,
    /// `rrggbb`, without `#`.
    pub color_hex: String,
}

impl Symbol {
    pub fn command(&self) -> &'static str {
        self.kind.command
    }
}

/// Fixed-capacity supply of symbols, consumed front to back.
#[derive(Debug, Clone)]
pub struct SymbolPool {
    symbols: Vec<Symbol>,
    cursor: usize,
}

impl SymbolPool {
    /// One symbol per palette color, in [`SYMBOL_KINDS`] order.
    pub fn new(palette: &[String]) -> Result<Self, SymbolError> {
        if palette.len() > SYMBOL_KINDS.len() {
            return Err(SymbolError::PaletteTooLarge {
                palette: palette.len(),
                symbols: SYMBOL_KINDS.len(),
            });
        }
        let symbols = SYMBOL_KINDS
            .iter()
            .zip(palette)
            .enumerate()
            .map(|(i, (kind, color))| Symbol {
                index: i + 1,
                kind,
                color_hex: color.trim_start_matches('#').to_string(),
            })
            .collect();
        Ok(Self { symbols, cursor: 0 })
    }

    /// Take the next unused symbol.
    pub fn take(&mut self) -> Result<Symbol, SymbolError> {
        let symbol = self
            .symbols
            .get(self.cursor)
            .cloned()
            .ok_or(SymbolError::PoolExhausted {
                capacity: self.symbols.len(),
            })?;
        self.cursor += 1;
        Ok(symbol)
    }

    pub fn capacity(&self) -> usize {
        self.symbols.len()
    }

    pub fn remaining(&self) -> usize {
        self.symbols.len() - self.cursor
    }
}

/// Which side of a result a grouping was claimed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// A claimed grouping: the symbol it received and its member texts.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLegend {
    pub symbol: Symbol,
    pub texts: Vec<String>,
    pub polarity: Polarity,
}

/// Content-addressed symbol assignment for text groupings.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    pool: SymbolPool,
    hashes: StableEnumeration<String>,
    groups: Vec<GroupLegend>,
}

impl SymbolRegistry {
    pub fn new(pool: SymbolPool) -> Self {
        Self {
            pool,
            hashes: StableEnumeration::new(),
            groups: Vec::new(),
        }
    }

    /// Symbol for `texts`, taking a new one from the pool on first sight.
    ///
    /// A grouping keeps the polarity it was first claimed with.
    pub fn claim(&mut self, texts: &[String], polarity: Polarity) -> Result<&Symbol, SymbolError> {
        let hash = grouping_hash(texts);
        if let Some(num) = self.hashes.get(&hash) {
            return Ok(&self.groups[num - 1].symbol);
        }

        let symbol = self.pool.take()?;
        tracing::debug!(
            command = symbol.command(),
            ?polarity,
            texts = ?texts,
            "Assigned symbol to grouping"
        );
        self.hashes.number(&hash);
        self.groups.push(GroupLegend {
            symbol,
            texts: texts.to_vec(),
            polarity,
        });
        Ok(&self.groups[self.groups.len() - 1].symbol)
    }

    /// Claimed symbols, in claim order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.groups.iter().map(|g| &g.symbol)
    }

    /// Groupings first claimed with `polarity`, in claim order.
    pub fn legend(&self, polarity: Polarity) -> impl Iterator<Item = &GroupLegend> {
        self.groups.iter().filter(move |g| g.polarity == polarity)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{:06x}", i)).collect()
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pool_hands_out_in_order() {
        let mut pool = SymbolPool::new(&palette(13)).unwrap();
        assert_eq!(pool.capacity(), 13);
        let first = pool.take().unwrap();
        let second = pool.take().unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(first.command(), "starResultSymbol");
        assert_eq!(first.color_hex, "000000");
        assert_eq!(second.command(), "diamondResultSymbol");
        assert_eq!(pool.remaining(), 11);
    }

    #[test]
    fn test_pool_exhaustion() {
        let mut pool = SymbolPool::new(&palette(13)).unwrap();
        for _ in 0..13 {
            pool.take().unwrap();
        }
        assert!(matches!(
            pool.take(),
            Err(SymbolError::PoolExhausted { capacity: 13 })
        ));
    }

    #[test]
    fn test_small_palette_shrinks_pool() {
        let mut pool = SymbolPool::new(&palette(2)).unwrap();
        pool.take().unwrap();
        pool.take().unwrap();
        assert!(pool.take().is_err());
    }

    #[test]
    fn test_palette_too_large() {
        assert!(matches!(
            SymbolPool::new(&palette(14)),
            Err(SymbolError::PaletteTooLarge {
                palette: 14,
                symbols: 13
            })
        ));
    }

    #[test]
    fn test_pool_strips_hash_prefix() {
        let mut pool = SymbolPool::new(&["#ffa500".to_string()]).unwrap();
        assert_eq!(pool.take().unwrap().color_hex, "ffa500");
    }

    #[test]
    fn test_kinds_are_consistent() {
        for kind in &SYMBOL_KINDS {
            assert!(kind.properties.starts_with(&format!("fill={}, ", kind.color_def)));
            assert!(kind.properties.contains(kind.shape));
            assert!(kind.command.ends_with("ResultSymbol"));
        }
    }

    #[test]
    fn test_registry_dedupes_by_content() {
        let mut registry = SymbolRegistry::new(SymbolPool::new(&palette(13)).unwrap());
        let a = registry
            .claim(&texts(&["climb"]), Polarity::Positive)
            .unwrap()
            .clone();
        let b = registry
            .claim(&texts(&["climb"]), Polarity::Positive)
            .unwrap()
            .clone();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_keeps_first_polarity() {
        let mut registry = SymbolRegistry::new(SymbolPool::new(&palette(13)).unwrap());
        registry
            .claim(&texts(&["climb"]), Polarity::Positive)
            .unwrap();
        registry
            .claim(&texts(&["climb"]), Polarity::Negative)
            .unwrap();
        registry.claim(&[], Polarity::Negative).unwrap();

        assert_eq!(registry.legend(Polarity::Positive).count(), 1);
        let negatives: Vec<_> = registry.legend(Polarity::Negative).collect();
        assert_eq!(negatives.len(), 1);
        assert!(negatives[0].texts.is_empty());
        assert_eq!(negatives[0].symbol.index, 2);
    }

    #[test]
    fn test_registry_exhaustion_leaves_state() {
        let mut registry = SymbolRegistry::new(SymbolPool::new(&palette(1)).unwrap());
        registry.claim(&texts(&["a"]), Polarity::Positive).unwrap();
        assert!(registry.claim(&texts(&["b"]), Polarity::Positive).is_err());
        assert_eq!(registry.len(), 1);
        // already-claimed groupings still resolve
        assert!(registry.claim(&texts(&["a"]), Polarity::Negative).is_ok());
    }
}
