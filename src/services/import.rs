//! CSV import service
//!
//! Imports a batch of transactions from CSV. The whole batch is parsed and
//! validated against a running balance before anything is written, so a
//! rejected import leaves no transactions and no categories behind.
//!
//! Expected layout, header row first:
//!
//! ```text
//! title,type,value,category
//! Salary,income,1000,Job
//! Rent,outcome,800.50,Housing
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};

use crate::error::{CashbookError, CashbookResult};
use crate::models::{Balance, Category, Money, Transaction, TransactionType};
use crate::services::balance::BalanceService;
use crate::services::category::CategoryService;
use crate::services::rules::{self, DEFAULT_MINIMUM_VALUE};
use crate::storage::LedgerStore;

/// Number of fields in every data row
const FIELD_COUNT: usize = 4;

/// One parsed, not yet validated, CSV data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub title: String,
    pub transaction_type: String,
    pub value: Money,
    pub category: String,
}

/// A row that passed every ledger rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    pub row: usize,
    pub title: String,
    pub transaction_type: TransactionType,
    pub value: Money,
    pub category: String,
}

/// A batch known to be valid against the seed balance
#[derive(Debug, Clone)]
pub struct ValidatedBatch {
    pub rows: Vec<ValidatedRow>,
    /// Balance after applying every row
    pub closing_balance: Balance,
}

/// Stages an import moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Parsing,
    Validating,
    Resolving,
    Persisting,
    Done,
    Failed,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::Resolving => "resolving",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Totals of an imported batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub income: Money,
    pub outcome: Money,
}

impl ImportSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let balance = Balance::compute(transactions);
        Self {
            imported: transactions.len(),
            income: balance.income,
            outcome: balance.outcome,
        }
    }
}

/// Parse CSV input into rows
///
/// The first record is a header and is skipped. Every field is trimmed.
pub fn parse_csv<R: Read>(reader: R) -> CashbookResult<Vec<ImportRow>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = result?;

        if record.len() != FIELD_COUNT {
            return Err(CashbookError::parse_at(
                row,
                format!(
                    "expected {} fields (title, type, value, category), found {}",
                    FIELD_COUNT,
                    record.len()
                ),
            ));
        }

        let value = Money::parse(&record[2])
            .map_err(|e| CashbookError::parse_at(row, format!("value '{}': {}", &record[2], e)))?;

        rows.push(ImportRow {
            row,
            title: record[0].to_string(),
            transaction_type: record[1].to_string(),
            value,
            category: record[3].to_string(),
        });
    }

    Ok(rows)
}

/// Check every row in order against a balance seeded from `seed`
///
/// Returns the first failure; later rows are not examined.
pub fn validate_rows(
    rows: Vec<ImportRow>,
    seed: Balance,
    minimum_value: Money,
) -> CashbookResult<ValidatedBatch> {
    let mut running = seed;

    let rows = rows
        .into_iter()
        .map(|row| {
            rules::check_value(row.value, minimum_value, Some(row.row))?;
            let transaction_type = rules::check_type(&row.transaction_type, Some(row.row))?;
            if transaction_type == TransactionType::Outcome {
                rules::check_funds(&running, row.value, Some(row.row))?;
            }
            running.record(transaction_type, row.value, Some(row.row))?;

            Ok(ValidatedRow {
                row: row.row,
                title: row.title,
                transaction_type,
                value: row.value,
                category: row.category,
            })
        })
        .collect::<CashbookResult<Vec<_>>>()?;

    Ok(ValidatedBatch {
        rows,
        closing_balance: running,
    })
}

/// Service for bulk CSV import
pub struct ImportService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
    minimum_value: Money,
}

impl<'a, S: LedgerStore + ?Sized> ImportService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            minimum_value: DEFAULT_MINIMUM_VALUE,
        }
    }

    /// Use a different minimum value
    pub fn with_minimum_value(mut self, minimum_value: Money) -> Self {
        self.minimum_value = minimum_value;
        self
    }

    /// Import transactions from a CSV file
    pub fn import_file(&self, path: &Path) -> CashbookResult<Vec<Transaction>> {
        let file = File::open(path).map_err(|e| {
            CashbookError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_from_reader(file)
    }

    /// Import transactions from any CSV source
    pub fn import_from_reader<R: Read>(&self, reader: R) -> CashbookResult<Vec<Transaction>> {
        debug!("event=import_stage stage={}", ImportStage::Parsing);
        let rows = parse_csv(reader).map_err(log_rejection)?;
        self.import_rows(rows)
    }

    /// Validate, resolve and persist already parsed rows
    ///
    /// Created transactions are returned in input order.
    pub fn import_rows(&self, rows: Vec<ImportRow>) -> CashbookResult<Vec<Transaction>> {
        let _guard = self.store.exclusive()?;

        debug!(
            "event=import_stage stage={} rows={}",
            ImportStage::Validating,
            rows.len()
        );
        let seed = BalanceService::new(self.store).current()?;
        let batch = validate_rows(rows, seed, self.minimum_value).map_err(log_rejection)?;

        if batch.rows.is_empty() {
            debug!("event=import_stage stage={} rows=0", ImportStage::Done);
            return Ok(Vec::new());
        }

        debug!("event=import_stage stage={}", ImportStage::Resolving);
        let categories = CategoryService::new(self.store);
        let mut resolved: HashMap<String, Category> = HashMap::new();
        let mut transactions = Vec::with_capacity(batch.rows.len());
        for row in batch.rows {
            let category = match resolved.get(&row.category) {
                Some(category) => category.clone(),
                None => {
                    let category = categories.resolve(&row.category)?;
                    resolved.insert(row.category.clone(), category.clone());
                    category
                }
            };
            transactions.push(Transaction::new(
                row.title,
                row.value,
                row.transaction_type,
                category.id,
            ));
        }

        debug!("event=import_stage stage={}", ImportStage::Persisting);
        self.store.save_transactions(&transactions)?;

        let summary = ImportSummary::from_transactions(&transactions);
        debug!("event=import_stage stage={}", ImportStage::Done);
        info!(
            "event=import_completed imported={} income={} outcome={} total={}",
            summary.imported,
            summary.income,
            summary.outcome,
            batch.closing_balance.total
        );

        Ok(transactions)
    }
}

fn log_rejection(err: CashbookError) -> CashbookError {
    warn!(
        "event=import_rejected stage={} row={} reason={:?}",
        ImportStage::Failed,
        err.row().map_or_else(|| "-".to_string(), |r| r.to_string()),
        err.to_string()
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashbookPaths;
    use crate::storage::{MemoryStore, Storage};
    use tempfile::TempDir;

    const HEADER: &str = "title,type,value,category\n";

    fn csv(rows: &str) -> String {
        format!("{}{}", HEADER, rows)
    }

    fn import(store: &MemoryStore, rows: &str) -> CashbookResult<Vec<Transaction>> {
        ImportService::new(store).import_from_reader(csv(rows).as_bytes())
    }

    #[test]
    fn test_parse_rows() {
        let input = csv(" Salary , income , 1000 , Job \nRent,outcome,800.50,Housing\n");
        let rows = parse_csv(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].title, "Salary");
        assert_eq!(rows[0].transaction_type, "income");
        assert_eq!(rows[1].value, Money::from_cents(80050));
        assert_eq!(rows[1].category, "Housing");
    }

    #[test]
    fn test_parse_malformed_rows() {
        let err =
            parse_csv(csv("Salary,income,1000,Job\nRent,outcome,800\n").as_bytes()).unwrap_err();
        assert!(matches!(err, CashbookError::Parse { row: Some(2), .. }));

        let err = parse_csv(csv("Salary,income,lots,Job\n").as_bytes()).unwrap_err();
        assert!(matches!(err, CashbookError::Parse { row: Some(1), .. }));
    }

    #[test]
    fn test_header_only_is_empty_import() {
        let store = MemoryStore::new();
        let created = import(&store, "").unwrap();

        assert!(created.is_empty());
        assert_eq!(store.transaction_count().unwrap(), 0);
        assert_eq!(store.category_count().unwrap(), 0);
    }

    #[test]
    fn test_import_in_order() {
        let store = MemoryStore::new();
        let created = import(&store, "Salary,income,1000,Job\nRent,outcome,800,Housing\n").unwrap();

        let titles: Vec<_> = created.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Salary", "Rent"]);

        let summary = ImportSummary::from_transactions(&created);
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.income, Money::from_units(1000));
        assert_eq!(summary.outcome, Money::from_units(800));
    }

    #[test]
    fn test_overdraft_rejects_whole_batch() {
        let store = MemoryStore::new();
        let err =
            import(&store, "Salary,income,1000,Job\nRent,outcome,1200,Housing\n").unwrap_err();

        assert!(matches!(
            err,
            CashbookError::InsufficientFunds { row: Some(2), needed, available }
                if needed == Money::from_units(1200) && available == Money::from_units(1000)
        ));
        assert_eq!(store.transaction_count().unwrap(), 0);
        assert_eq!(store.category_count().unwrap(), 0);
    }

    #[test]
    fn test_order_matters() {
        let store = MemoryStore::new();
        let err =
            import(&store, "Rent,outcome,1200,Housing\nSalary,income,1000,Job\n").unwrap_err();

        assert!(matches!(err, CashbookError::InsufficientFunds { row: Some(1), .. }));
    }

    #[test]
    fn test_seeded_from_existing_balance() {
        let job = Category::new("Job");
        let store = MemoryStore::with_records(
            vec![job.clone()],
            vec![Transaction::new(
                "Salary",
                Money::from_units(500),
                TransactionType::Income,
                job.id,
            )],
        );

        import(&store, "Rent,outcome,400,Housing\n").unwrap();
        let err = import(&store, "Food,outcome,200,Groceries\n").unwrap_err();
        assert!(matches!(err, CashbookError::InsufficientFunds { row: Some(1), .. }));
        assert_eq!(store.transaction_count().unwrap(), 2);
    }

    #[test]
    fn test_shared_new_category_created_once() {
        let store = MemoryStore::new();
        let created = import(
            &store,
            "Salary,income,1000,Job\nBonus,income,200,Job\nLunch,outcome,15,Food\n",
        )
        .unwrap();

        assert_eq!(created[0].category_id, created[1].category_id);
        assert_ne!(created[0].category_id, created[2].category_id);
        assert_eq!(store.category_count().unwrap(), 2);
    }

    #[test]
    fn test_zero_value_rejected_at_any_row() {
        for (rows, bad_row) in [
            ("Gift,income,0,Misc\nSalary,income,10,Job\n", 1),
            ("Salary,income,10,Job\nGift,income,0,Misc\n", 2),
            ("Salary,income,10,Job\nFee,outcome,-3,Misc\n", 2),
        ] {
            let store = MemoryStore::new();
            let err = import(&store, rows).unwrap_err();
            assert!(matches!(
                err,
                CashbookError::InvalidValue { row: Some(r), .. } if r == bad_row
            ));
            assert_eq!(store.transaction_count().unwrap(), 0);
        }
    }

    #[test]
    fn test_value_checked_before_type() {
        let store = MemoryStore::new();
        let err = import(&store, "Move,transfer,0,Misc\n").unwrap_err();

        assert!(matches!(err, CashbookError::InvalidValue { row: Some(1), .. }));
    }

    #[test]
    fn test_sub_cent_value_is_parse_error() {
        let store = MemoryStore::new();
        let err = import(&store, "A,income,100.99,Job\nB,outcome,100.999,Rent\n").unwrap_err();

        assert!(matches!(err, CashbookError::Parse { row: Some(2), .. }));
        assert_eq!(store.transaction_count().unwrap(), 0);
    }

    #[test]
    fn test_overflowing_incomes_rejected() {
        let store = MemoryStore::new();
        let err = import(
            &store,
            "A,income,90000000000000000,Job\nB,income,90000000000000000,Job\n",
        )
        .unwrap_err();

        assert!(matches!(err, CashbookError::BalanceOverflow { row: Some(2), .. }));
        assert_eq!(store.transaction_count().unwrap(), 0);
        assert_eq!(store.category_count().unwrap(), 0);
    }

    #[test]
    fn test_unknown_type_rejected_with_row() {
        let store = MemoryStore::new();
        let err = import(&store, "Salary,income,10,Job\nMove,transfer,5,Misc\n").unwrap_err();

        assert!(matches!(err, CashbookError::InvalidType { row: Some(2), .. }));
        assert_eq!(store.category_count().unwrap(), 0);
    }

    #[test]
    fn test_validate_rows_closing_balance() {
        let rows = parse_csv(csv("A,income,100,X\nB,outcome,30,Y\n").as_bytes()).unwrap();
        let batch = validate_rows(rows, Balance::zero(), DEFAULT_MINIMUM_VALUE).unwrap();

        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.closing_balance.total, Money::from_units(70));
    }

    #[test]
    fn test_failed_file_import_leaves_files_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage.save_all().unwrap();

        let before_txns = std::fs::read_to_string(paths.transactions_file()).unwrap();
        let before_cats = std::fs::read_to_string(paths.categories_file()).unwrap();

        let input = temp_dir.path().join("batch.csv");
        std::fs::write(&input, csv("Salary,income,1000,Job\nRent,outcome,1200,Housing\n")).unwrap();

        let err = ImportService::new(&storage).import_file(&input).unwrap_err();
        assert_eq!(err.row(), Some(2));

        assert_eq!(std::fs::read_to_string(paths.transactions_file()).unwrap(), before_txns);
        assert_eq!(std::fs::read_to_string(paths.categories_file()).unwrap(), before_cats);
    }

    #[test]
    fn test_file_import_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();

        let input = temp_dir.path().join("batch.csv");
        std::fs::write(&input, csv("Salary,income,1000,Job\nRent,outcome,800,Housing\n")).unwrap();
        ImportService::new(&storage).import_file(&input).unwrap();

        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.find_all_transactions().unwrap().len(), 2);
        assert_eq!(reopened.find_all_categories().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let store = MemoryStore::new();
        let err = ImportService::new(&store)
            .import_file(Path::new("/nonexistent/batch.csv"))
            .unwrap_err();
        assert!(matches!(err, CashbookError::Io(_)));
    }
}
