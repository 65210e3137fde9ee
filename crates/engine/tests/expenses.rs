use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, ExpenseCmd, ExpenseUpdateCmd, MoneyCents, ParticipantPolicy, PersonId,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_policy(policy: ParticipantPolicy) -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .participant_policy(policy)
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    engine_with_policy(ParticipantPolicy::default()).await
}

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

fn person(name: &str) -> PersonId {
    PersonId::parse(name).unwrap()
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn create_and_read_back_expense() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_expense(
            ExpenseCmd::new(cents(300_00), "  Dinner  ", "Alice")
                .participants(["alice", "Bob", "CAROL"]),
        )
        .await
        .unwrap();

    assert_eq!(created.description, "Dinner");
    assert_eq!(created.payer, person("alice"));
    assert_eq!(
        created.participants,
        vec![person("alice"), person("bob"), person("carol")]
    );

    let fetched = engine.expense(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_expenses_oldest_first() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .create_expense(ExpenseCmd::new(cents(10_00), "first", "alice"))
        .await
        .unwrap();
    let second = engine
        .create_expense(ExpenseCmd::new(cents(20_00), "second", "bob"))
        .await
        .unwrap();

    let ids: Vec<Uuid> = engine
        .list_expenses()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn balances_and_settlements_from_stored_expenses() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_expense(
            ExpenseCmd::new(cents(300_00), "Dinner", "alice").participants(["alice", "bob", "carol"]),
        )
        .await
        .unwrap();

    let balances = engine.balances().await.unwrap();
    let balances: Vec<(&str, Decimal)> = balances
        .iter()
        .map(|b| (b.person.as_str(), b.balance))
        .collect();
    assert_eq!(
        balances,
        vec![("alice", dec(200)), ("bob", dec(-100)), ("carol", dec(-100))]
    );

    let settlements = engine.settlements().await.unwrap();
    let settlements: Vec<(&str, &str, Decimal)> = settlements
        .iter()
        .map(|s| (s.from_person.as_str(), s.to_person.as_str(), s.amount))
        .collect();
    assert_eq!(
        settlements,
        vec![("bob", "alice", dec(100)), ("carol", "alice", dec(100))]
    );

    let people = engine.people().await.unwrap();
    assert_eq!(people, vec![person("alice"), person("bob"), person("carol")]);
}

#[tokio::test]
async fn reports_follow_every_write() {
    let (engine, _db) = engine_with_db().await;

    let lunch = engine
        .create_expense(ExpenseCmd::new(cents(40_00), "Lunch", "alice").participants(["bob"]))
        .await
        .unwrap();
    assert_eq!(engine.settlements().await.unwrap().len(), 1);

    engine
        .update_expense(
            &lunch.id.to_string(),
            ExpenseUpdateCmd::default().participants(["alice"]),
        )
        .await
        .unwrap();
    assert!(engine.settlements().await.unwrap().is_empty());

    engine.delete_expense(&lunch.id.to_string()).await.unwrap();
    assert!(engine.balances().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_ledger_has_no_reports() {
    let (engine, _db) = engine_with_db().await;

    assert!(engine.list_expenses().await.unwrap().is_empty());
    assert!(engine.balances().await.unwrap().is_empty());
    assert!(engine.settlements().await.unwrap().is_empty());
    assert!(engine.people().await.unwrap().is_empty());
}

#[tokio::test]
async fn omitted_participants_use_policy() {
    let (engine, _db) = engine_with_db().await;
    let expense = engine
        .create_expense(ExpenseCmd::new(cents(5_00), "Coffee", "alice"))
        .await
        .unwrap();
    assert_eq!(expense.participants, vec![person("alice")]);

    let (engine, _db) = engine_with_policy(ParticipantPolicy::RequireExplicit).await;
    let err = engine
        .create_expense(ExpenseCmd::new(cents(5_00), "Coffee", "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingParticipants(_)));
    assert!(engine.list_expenses().await.unwrap().is_empty());

    let (engine, _db) = engine_with_policy(ParticipantPolicy::KnownNames {
        names: vec!["bob".to_string(), "carol".to_string()],
        fallback: vec!["dave".to_string()],
    })
    .await;
    let matched = engine
        .create_expense(ExpenseCmd::new(cents(30_00), "Cinema with Carol", "alice"))
        .await
        .unwrap();
    assert_eq!(matched.participants, vec![person("alice"), person("carol")]);
    let fallback = engine
        .create_expense(ExpenseCmd::new(cents(30_00), "Groceries", "alice"))
        .await
        .unwrap();
    assert_eq!(fallback.participants, vec![person("alice"), person("dave")]);
}

#[tokio::test]
async fn empty_explicit_list_counts_as_omitted() {
    let (engine, _db) = engine_with_policy(ParticipantPolicy::RequireExplicit).await;
    let err = engine
        .create_expense(
            ExpenseCmd::new(cents(5_00), "Coffee", "alice").participants(Vec::<String>::new()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingParticipants(_)));
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .create_expense(ExpenseCmd::new(cents(0), "Nothing", "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_expense(ExpenseCmd::new(cents(1_00), "  ", "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine
        .create_expense(ExpenseCmd::new(cents(1_00), "Snack", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine
        .create_expense(ExpenseCmd::new(cents(1_00), "Snack", "alice").participants(["bob", ""]))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    assert_eq!(count_rows(&db, "expenses").await, 0);
    assert_eq!(count_rows(&db, "expense_participants").await, 0);
}

#[tokio::test]
async fn update_changes_fields_and_refreshes_timestamp() {
    let (engine, db) = engine_with_db().await;
    let created = engine
        .create_expense(
            ExpenseCmd::new(cents(40_00), "Groceries", "alice").participants(["bob", "carol"]),
        )
        .await
        .unwrap();

    let updated = engine
        .update_expense(
            &created.id.to_string(),
            ExpenseUpdateCmd::default()
                .amount(cents(60_00))
                .description("Groceries and wine")
                .paid_by("Dave"),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.amount, cents(60_00));
    assert_eq!(updated.description, "Groceries and wine");
    assert_eq!(updated.payer, person("dave"));
    assert_eq!(
        updated.participants,
        vec![person("bob"), person("carol"), person("alice"), person("dave")]
    );
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let stored = engine.expense(&created.id.to_string()).await.unwrap();
    assert_eq!(stored, updated);
    assert_eq!(count_rows(&db, "expense_participants").await, 4);
}

#[tokio::test]
async fn update_with_invalid_amount_leaves_expense_untouched() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .create_expense(ExpenseCmd::new(cents(40_00), "Groceries", "alice"))
        .await
        .unwrap();

    let err = engine
        .update_expense(
            &created.id.to_string(),
            ExpenseUpdateCmd::default()
                .description("changed")
                .amount(cents(-1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let stored = engine.expense(&created.id.to_string()).await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn delete_removes_expense_and_participants() {
    let (engine, db) = engine_with_db().await;
    let created = engine
        .create_expense(ExpenseCmd::new(cents(12_00), "Taxi", "alice").participants(["bob"]))
        .await
        .unwrap();
    assert_eq!(count_rows(&db, "expense_participants").await, 2);

    let deleted = engine
        .delete_expense(&created.id.to_string())
        .await
        .unwrap();
    assert_eq!(deleted, created.id);
    assert_eq!(count_rows(&db, "expenses").await, 0);
    assert_eq!(count_rows(&db, "expense_participants").await, 0);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let (engine, _db) = engine_with_db().await;
    let missing = Uuid::new_v4().to_string();

    assert!(matches!(
        engine.expense(&missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine
            .update_expense(&missing, ExpenseUpdateCmd::default().description("x"))
            .await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_expense(&missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.expense("not-an-id").await,
        Err(EngineError::InvalidId(_))
    ));
}
