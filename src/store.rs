//! The transaction store: an owned, injectable cache of the ledger.
//!
//! The store holds the most recently loaded snapshot and replaces it
//! wholesale on every successful load. Readers hold `Arc` snapshots, so a
//! reload in progress is invisible to them: they see the old set or the
//! new set, never a torn one.

use crate::error::Result;
use crate::source::TransactionSource;
use crate::transaction::Transaction;
use log::{debug, info};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Ledger fields that feed filter option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionField {
    BankAccount,
    Kind,
    Status,
    Client,
    PaidBy,
    Movement,
}

/// Store lifecycle notifications published to subscribers.
///
/// Consumers that previously polled for changes watch these instead; the
/// store is the single authority over the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The cache was replaced by a successful load.
    Replaced { revision: u64, rows: usize },

    /// The cache was cleared.
    Cleared,
}

/// Handle for an in-flight fetch.
///
/// Tickets are ordered by issue time. Applying a ticket older than the
/// newest issued one is a stale response and is discarded, so a slow fetch
/// can never overwrite the result of a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Owned cache of ledger transactions with an explicit lifecycle:
/// create, load, refresh, clear.
///
/// A failed load leaves the previous snapshot untouched and surfaces the
/// error; callers must report that as "no data available" rather than
/// showing the stale snapshot as current.
pub struct TransactionStore<S> {
    source: S,
    cache: Arc<Vec<Transaction>>,
    loaded: bool,
    revision: u64,
    issued_seq: u64,
    applied_seq: u64,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl<S: TransactionSource> TransactionStore<S> {
    /// Creates an empty store over the given source.
    pub fn new(source: S) -> Self {
        TransactionStore {
            source,
            cache: Arc::new(Vec::new()),
            loaded: false,
            revision: 0,
            issued_seq: 0,
            applied_seq: 0,
            subscribers: Vec::new(),
        }
    }

    /// Loads the ledger from the source, replacing the cache wholesale.
    ///
    /// On error the previous cache is untouched and the error propagates.
    pub fn load(&mut self) -> Result<()> {
        let ticket = self.begin_fetch();
        let rows = self.source.fetch()?;
        self.apply_fetch(ticket, rows);
        Ok(())
    }

    /// Forces a reload. Same semantics as [`load`](Self::load).
    pub fn refresh(&mut self) -> Result<()> {
        self.load()
    }

    /// Issues a ticket for a fetch about to start.
    ///
    /// Callers running fetches off-thread take a ticket first, fetch, then
    /// hand the rows back through [`apply_fetch`](Self::apply_fetch).
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        debug!("Issued fetch ticket {}", self.issued_seq);
        FetchTicket(self.issued_seq)
    }

    /// Installs fetched rows if the ticket is still the newest.
    ///
    /// Returns `true` if the rows were installed. A ticket superseded by a
    /// newer `begin_fetch` is stale and its rows are dropped.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, rows: Vec<Transaction>) -> bool {
        if ticket.0 < self.issued_seq || ticket.0 <= self.applied_seq {
            info!(
                "Discarding stale fetch {} (newest issued {})",
                ticket.0, self.issued_seq
            );
            return false;
        }
        self.applied_seq = ticket.0;
        self.revision += 1;
        let count = rows.len();
        self.cache = Arc::new(rows);
        self.loaded = true;
        info!("Loaded {} transactions (revision {})", count, self.revision);
        self.notify(StoreEvent::Replaced {
            revision: self.revision,
            rows: count,
        });
        true
    }

    /// Drops the cache and resets the loaded flag.
    pub fn clear(&mut self) {
        self.cache = Arc::new(Vec::new());
        self.loaded = false;
        self.revision += 1;
        self.notify(StoreEvent::Cleared);
    }

    /// Whether a snapshot has been installed since creation or the last clear.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Monotonic counter bumped on every replacement or clear.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Cheap handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Transaction>> {
        Arc::clone(&self.cache)
    }

    /// Number of transactions in the current snapshot.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Registers a subscriber for store lifecycle events.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: StoreEvent) {
        // Dropped receivers fall out of the list on their next event.
        self.subscribers
            .retain(|sub| sub.send(event.clone()).is_ok());
    }

    /// Distinct values for a field: non-empty, deduplicated, sorted
    /// lexicographically. Feeds filter option sets.
    pub fn field_options(&self, field: OptionField) -> Vec<String> {
        let mut values: Vec<String> = self
            .cache
            .iter()
            .map(|tx| match field {
                OptionField::BankAccount => tx.bank_account.clone(),
                OptionField::Kind => tx.kind.clone(),
                OptionField::Status => tx.status.as_str().to_string(),
                OptionField::Client => tx.client.clone(),
                OptionField::PaidBy => tx.paid_by.clone(),
                OptionField::Movement => tx.movement.as_str().to_string(),
            })
            .filter(|v| !v.is_empty())
            .collect();
        values.sort();
        values.dedup();
        values
    }
}
