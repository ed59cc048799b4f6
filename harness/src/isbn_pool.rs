//! Seeded, non-repeating selection of catalog ISBNs.

use bookstore_core::Book;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// ISBNs not yet handed out in this run.
///
/// `draw` removes what it returns, so no ISBN serves two purposes. The same
/// seed over the same catalog order yields the same sequence.
#[derive(Debug, Clone)]
pub struct IsbnPool {
    available: Vec<String>,
    rng: StdRng,
}

impl IsbnPool {
    pub fn new<I>(isbns: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut available: Vec<String> = Vec::new();
        for isbn in isbns {
            if !available.contains(&isbn) {
                available.push(isbn);
            }
        }
        Self {
            available,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Every catalog ISBN except those in `exclude`.
    pub fn from_catalog(catalog: &[Book], exclude: &[&str], seed: u64) -> Self {
        let isbns = catalog
            .iter()
            .filter(|b| !exclude.contains(&b.isbn.as_str()))
            .map(|b| b.isbn.clone());
        Self::new(isbns, seed)
    }

    pub fn draw(&mut self) -> Option<String> {
        if self.available.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.available.len());
        Some(self.available.swap_remove(index))
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.available.iter().any(|i| i == isbn)
    }

    pub fn remaining(&self) -> usize {
        self.available.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isbns(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("isbn-{i}")).collect()
    }

    #[test]
    fn draws_never_repeat() {
        let mut pool = IsbnPool::new(isbns(7), 1);
        let mut drawn = Vec::new();
        while let Some(isbn) = pool.draw() {
            assert!(!drawn.contains(&isbn));
            drawn.push(isbn);
        }
        assert_eq!(drawn.len(), 7);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = IsbnPool::new(isbns(7), 99);
        let mut b = IsbnPool::new(isbns(7), 99);
        for _ in 0..7 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn catalog_exclusions_are_never_drawn() {
        let catalog: Vec<Book> = ["9781449325862", "a", "b"]
            .iter()
            .map(|isbn| serde_json::from_value(serde_json::json!({ "isbn": isbn })).unwrap())
            .collect();
        let mut pool = IsbnPool::from_catalog(&catalog, &["9781449325862"], 3);
        assert!(!pool.contains("9781449325862"));
        assert_eq!(pool.remaining(), 2);
        pool.draw();
        pool.draw();
        assert!(pool.draw().is_none());
    }

    #[test]
    fn duplicates_collapse() {
        let mut pool = IsbnPool::new(vec!["x".to_string(), "x".to_string()], 0);
        assert_eq!(pool.remaining(), 1);
        assert_eq!(pool.draw().as_deref(), Some("x"));
        assert!(pool.draw().is_none());
    }
}
