use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use fx_core::db::{MemoryRepositoryFactory, RepositoryRegistry};
use fx_core::{
    DepositCalculator, DepositField, InputField, KeyValueRepository, RepositoryError,
    TransferField, TransferSession, TransferSnapshotStore,
};
use fx_db_sqlite::SqliteRepositoryFactory;

use crate::routes::Route;
use crate::utils::{FieldChange, ParseChangeError};
use crate::views;

/// Build a [`RepositoryRegistry`] with every backend this binary knows about.
///
/// To add a new backend:
/// 1. Create a crate that implements
///    [`fx_core::db::RepositoryFactory`] for a unit struct.
/// 2. Add it as a dependency of this crate.
/// 3. Add one `registry.register(...)` line below.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry.register(Box::new(MemoryRepositoryFactory));
    registry
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown field '{field}' on {route}; expected one of: {expected}")]
    UnknownField {
        field: String,
        route: &'static str,
        expected: String,
    },

    #[error("the home page has no inputs")]
    NoInputs,

    #[error(transparent)]
    BadCommand(#[from] ParseChangeError),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Split command-line arguments into the page to open and its change events.
///
/// The first argument is the page path unless it already looks like a
/// change event, in which case the home page is used.
pub fn parse_invocation(args: &[String]) -> Result<(Route, Vec<FieldChange>), ParseChangeError> {
    let (route, rest) = match args.split_first() {
        Some((first, rest)) if !FieldChange::is_change(first) => (Route::resolve(first), rest),
        _ => (Route::Home, args),
    };
    let changes = rest
        .iter()
        .map(|arg| arg.parse())
        .collect::<Result<Vec<_>, _>>()?;
    Ok((route, changes))
}

/// The page currently on screen together with its calculator state.
enum Page {
    Home,
    Transfer(TransferSession),
    Deposit(DepositCalculator),
}

/// A running calculator: storage plus the open page.
pub struct App {
    storage: Arc<dyn KeyValueRepository>,
    route: Route,
    page: Page,
}

fn lookup<F: InputField>(
    route: Route,
    field: &str,
) -> Result<F, AppError> {
    F::parse(field).ok_or_else(|| AppError::UnknownField {
        field: field.to_string(),
        route: route.path(),
        expected: F::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

impl App {
    pub async fn open(
        storage: Arc<dyn KeyValueRepository>,
        route: Route,
    ) -> Result<Self, AppError> {
        let page = Self::open_page(&storage, route).await?;
        Ok(Self {
            storage,
            route,
            page,
        })
    }

    /// Each visit starts a fresh page: the transfer page reloads its saved
    /// inputs and the deposit page starts from zero.
    async fn open_page(
        storage: &Arc<dyn KeyValueRepository>,
        route: Route,
    ) -> Result<Page, AppError> {
        let page = match route {
            Route::Home => Page::Home,
            Route::Transfer => Page::Transfer(TransferSession::open(snapshot_store(storage)).await?),
            Route::Deposit => Page::Deposit(DepositCalculator::default()),
        };
        info!(path = route.path(), "page opened");
        Ok(page)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub async fn navigate(
        &mut self,
        route: Route,
    ) -> Result<(), AppError> {
        self.page = Self::open_page(&self.storage, route).await?;
        self.route = route;
        Ok(())
    }

    /// Apply one change event to the open page.
    pub async fn apply(
        &mut self,
        change: &FieldChange,
    ) -> Result<(), AppError> {
        match &mut self.page {
            Page::Home => return Err(AppError::NoInputs),
            Page::Transfer(session) => {
                let field: TransferField = lookup(self.route, &change.field)?;
                session.change(field, &change.raw).await?;
            }
            Page::Deposit(calculator) => {
                let field: DepositField = lookup(self.route, &change.field)?;
                let update = calculator.change(field, &change.raw);
                debug!(
                    field = field.as_str(),
                    value = update.value,
                    recomputed = update.recomputed.len(),
                    "deposit input changed"
                );
            }
        }
        Ok(())
    }

    /// Forget the saved transfer inputs and reopen the current page.
    pub async fn reset_saved_inputs(&mut self) -> Result<(), AppError> {
        snapshot_store(&self.storage).clear().await?;
        info!("saved inputs cleared");
        self.navigate(self.route).await
    }

    pub fn render(&self) -> String {
        let body = match &self.page {
            Page::Home => views::home::render(),
            Page::Transfer(session) => views::transfer::render(&session.inputs(), session.derived()),
            Page::Deposit(calculator) => {
                views::deposit::render(&calculator.inputs(), calculator.derived())
            }
        };
        views::layout(self.route, &body)
    }
}

fn snapshot_store(storage: &Arc<dyn KeyValueRepository>) -> TransferSnapshotStore {
    TransferSnapshotStore::new(Box::new(Arc::clone(storage)))
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Change(FieldChange),
    Navigate(Route),
    Quit,
}

impl Command {
    /// `None` for blank lines.
    pub fn parse(line: &str) -> Option<Result<Self, ParseChangeError>> {
        let line = line.trim();
        match line {
            "" => None,
            "q" | "quit" | "exit" => Some(Ok(Command::Quit)),
            path if path.starts_with('/') => Some(Ok(Command::Navigate(Route::resolve(path)))),
            change => Some(change.parse().map(Command::Change)),
        }
    }
}

/// Read commands from `input` until end of input or `quit`, re-rendering
/// the page to `output` after each one.
///
/// Bad lines are reported and skipped; storage errors end the loop.
pub async fn run_interactive<I, O>(
    app: &mut App,
    input: I,
    output: &mut O,
) -> anyhow::Result<()>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match Command::parse(&line) {
            None => continue,
            Some(Err(error)) => Err(error.into()),
            Some(Ok(Command::Quit)) => break,
            Some(Ok(Command::Navigate(route))) => app.navigate(route).await,
            Some(Ok(Command::Change(change))) => app.apply(&change).await,
        };

        match outcome {
            Ok(()) => output.write_all(app.render().as_bytes()).await?,
            Err(AppError::Storage(error)) => return Err(error.into()),
            Err(error) => {
                warn!(%error, "ignoring input line");
                output.write_all(format!("error: {error}\n").as_bytes()).await?;
            }
        }
        output.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fx_core::db::MemoryRepository;
    use fx_core::{STORAGE_KEY, TransferInputs};
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn change(field: &str, raw: &str) -> FieldChange {
        FieldChange {
            field: field.to_string(),
            raw: raw.to_string(),
        }
    }

    fn memory_storage() -> Arc<dyn KeyValueRepository> {
        Arc::new(MemoryRepository::new())
    }

    // =========================================================================
    // Argument parsing
    // =========================================================================

    #[test]
    fn invocation_with_path_and_changes() {
        let (route, changes) = parse_invocation(&args(&["/calc1", "amt=1000", "sellRate=1.35"])).unwrap();

        assert_eq!(route, Route::Transfer);
        assert_eq!(changes, vec![change("amt", "1000"), change("sellRate", "1.35")]);
    }

    #[test]
    fn invocation_without_path_opens_home() {
        let (route, changes) = parse_invocation(&args(&["amt=1"])).unwrap();

        assert_eq!(route, Route::Home);
        assert_eq!(changes.len(), 1);
        assert_eq!(parse_invocation(&[]).unwrap(), (Route::Home, vec![]));
    }

    #[test]
    fn invocation_rejects_bare_word_after_path() {
        assert!(parse_invocation(&args(&["/calc2", "termDepositAmt"])).is_err());
    }

    #[test]
    fn command_parsing() {
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse("quit"), Some(Ok(Command::Quit)));
        assert_eq!(
            Command::parse("/calc2/"),
            Some(Ok(Command::Navigate(Route::Deposit)))
        );
        assert_eq!(
            Command::parse("amt=5"),
            Some(Ok(Command::Change(change("amt", "5"))))
        );
        assert!(matches!(Command::parse("amt"), Some(Err(_))));
    }

    // =========================================================================
    // App
    // =========================================================================

    #[test]
    fn registry_knows_both_backends() {
        assert_eq!(build_registry().available_backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn transfer_changes_are_saved() {
        let storage = memory_storage();
        let mut app = App::open(Arc::clone(&storage), Route::Transfer).await.unwrap();

        app.apply(&change("amt", "250")).await.unwrap();

        let saved = TransferSnapshotStore::new(Box::new(Arc::clone(&storage)))
            .load()
            .await
            .unwrap();
        assert_eq!(
            saved,
            TransferInputs {
                amt: 250.0,
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn transfer_page_reloads_saved_inputs_on_revisit() {
        let mut app = App::open(memory_storage(), Route::Transfer).await.unwrap();
        app.apply(&change("amt", "1000")).await.unwrap();

        app.navigate(Route::Home).await.unwrap();
        app.navigate(Route::Transfer).await.unwrap();

        assert!(app.render().contains("Amount $ 1000\n"));
    }

    #[tokio::test]
    async fn deposit_page_starts_from_zero_on_revisit() {
        let mut app = App::open(memory_storage(), Route::Deposit).await.unwrap();
        app.apply(&change("termDepositAmt", "10000")).await.unwrap();

        app.navigate(Route::Deposit).await.unwrap();

        assert!(app.render().contains("  Deposit amount  0\n"));
    }

    #[tokio::test]
    async fn unknown_field_is_reported() {
        let mut app = App::open(memory_storage(), Route::Deposit).await.unwrap();

        let err = app.apply(&change("amt", "1")).await.unwrap_err();

        assert!(matches!(err, AppError::UnknownField { .. }));
        assert!(err.to_string().contains("termDepositAmt, buyRate, sellRate"));
    }

    #[tokio::test]
    async fn home_page_has_no_inputs() {
        let mut app = App::open(memory_storage(), Route::Home).await.unwrap();

        let err = app.apply(&change("amt", "1")).await.unwrap_err();

        assert!(matches!(err, AppError::NoInputs));
    }

    #[tokio::test]
    async fn reset_clears_saved_inputs() {
        let storage = memory_storage();
        let mut app = App::open(Arc::clone(&storage), Route::Transfer).await.unwrap();
        app.apply(&change("amt", "1000")).await.unwrap();

        app.reset_saved_inputs().await.unwrap();

        assert_eq!(storage.get_item(STORAGE_KEY).await.unwrap(), None);
        assert!(app.render().contains("Amount $ 0\n"));
    }

    #[tokio::test]
    async fn interactive_loop_renders_after_each_command() {
        let mut app = App::open(memory_storage(), Route::Home).await.unwrap();
        let input: &[u8] = b"/calc2\ntermDepositAmt=10000\n\nbogus\nquit\namt=1\n";
        let mut output = Vec::new();

        run_interactive(&mut app, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Sell and Buy term deposit").count(), 2);
        assert!(text.contains("= 86.25 ("));
        assert!(text.contains("error: "));
        assert_eq!(app.route(), Route::Deposit);
    }
}
