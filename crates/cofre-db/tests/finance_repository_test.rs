//! Integration tests for the Finance repository using in-memory
//! SurrealDB.

use chrono::{Duration, Utc};
use cofre_core::models::finance::{Finance, FinanceStatus, FinanceType};
use cofre_core::repository::{FinanceChanges, FinanceRepository, Pagination};
use cofre_db::repository::SurrealFinanceRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> SurrealFinanceRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    cofre_db::run_migrations(&db).await.unwrap();
    SurrealFinanceRepository::new(db)
}

fn finance(user_id: Uuid, tipo: FinanceType, valor: f64) -> Finance {
    Finance::new(user_id, tipo, "Lancamento", valor, "geral", None)
}

#[tokio::test]
async fn create_and_find_by_id() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();

    let created = repo
        .create(finance(user_id, FinanceType::Receita, 5000.0))
        .await
        .unwrap();
    assert_eq!(created.user_id, user_id);
    assert_eq!(created.tipo, FinanceType::Receita);
    assert_eq!(created.status, FinanceStatus::Pendente);
    assert_eq!(created.valor, 5000.0);
    assert!(created.data_pagamento.is_none());
    assert!(!created.is_deleted);

    let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.valor, 5000.0);
}

#[tokio::test]
async fn find_by_user_id_filters_owner_and_deleted() {
    let repo = setup().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let a1 = repo
        .create(finance(alice, FinanceType::Receita, 100.0))
        .await
        .unwrap();
    let _a2 = repo
        .create(finance(alice, FinanceType::Despesa, 50.0))
        .await
        .unwrap();
    let _b1 = repo
        .create(finance(bob, FinanceType::Receita, 70.0))
        .await
        .unwrap();

    let for_alice = repo
        .find_by_user_id(alice, Pagination::default())
        .await
        .unwrap();
    assert_eq!(for_alice.len(), 2);
    assert!(for_alice.iter().all(|f| f.user_id == alice));

    repo.delete(a1.id).await.unwrap();
    let for_alice = repo
        .find_by_user_id(alice, Pagination::default())
        .await
        .unwrap();
    assert_eq!(for_alice.len(), 1);
}

#[tokio::test]
async fn find_all_orders_by_transaction_date_desc() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();

    let old = Finance::new(
        user_id,
        FinanceType::Receita,
        "antiga",
        10.0,
        "geral",
        Some(Utc::now() - Duration::days(3)),
    );
    let recent = Finance::new(
        user_id,
        FinanceType::Receita,
        "recente",
        20.0,
        "geral",
        Some(Utc::now()),
    );
    repo.create(old).await.unwrap();
    repo.create(recent).await.unwrap();

    let all = repo.find_all(Pagination::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].descricao, "recente");
    assert_eq!(all[1].descricao, "antiga");
}

#[tokio::test]
async fn update_is_sparse_and_handles_payment_date() {
    let repo = setup().await;
    let created = repo
        .create(finance(Uuid::new_v4(), FinanceType::Receita, 100.0))
        .await
        .unwrap();

    let paid_at = Utc::now();
    let updated = repo
        .update(
            created.id,
            FinanceChanges {
                status: Some(FinanceStatus::Confirmada),
                data_pagamento: Some(Some(paid_at)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, FinanceStatus::Confirmada);
    assert!(updated.data_pagamento.is_some());
    // Untouched fields survive.
    assert_eq!(updated.valor, 100.0);
    assert_eq!(updated.descricao, "Lancamento");

    // Clearing via the inner None.
    let cleared = repo
        .update(
            created.id,
            FinanceChanges {
                data_pagamento: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.data_pagamento.is_none());
    assert_eq!(cleared.status, FinanceStatus::Confirmada);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update(
            Uuid::new_v4(),
            FinanceChanges {
                valor: Some(10.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, cofre_core::CofreError::NotFound { .. }));
}

#[tokio::test]
async fn delete_and_restore_round_trip() {
    let repo = setup().await;
    let created = repo
        .create(finance(Uuid::new_v4(), FinanceType::Despesa, 42.0))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();
    let deleted = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.deleted.is_some());

    repo.restore(created.id).await.unwrap();
    let restored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(!restored.is_deleted);
    assert!(restored.deleted.is_none());
}

#[tokio::test]
async fn counts_exclude_deleted() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();

    let a = repo
        .create(finance(user_id, FinanceType::Receita, 10.0))
        .await
        .unwrap();
    let _b = repo
        .create(finance(user_id, FinanceType::Despesa, 20.0))
        .await
        .unwrap();
    let _other = repo
        .create(finance(Uuid::new_v4(), FinanceType::Receita, 30.0))
        .await
        .unwrap();

    assert_eq!(repo.count().await.unwrap(), 3);
    assert_eq!(repo.count_by_user_id(user_id).await.unwrap(), 2);

    repo.delete(a.id).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.count_by_user_id(user_id).await.unwrap(), 1);
}

#[tokio::test]
async fn sum_only_counts_confirmed_non_deleted_of_type() {
    let repo = setup().await;
    let user_id = Uuid::new_v4();

    // No rows at all: zero, not null.
    assert_eq!(
        repo.sum_by_user_id(user_id, FinanceType::Receita)
            .await
            .unwrap(),
        0.0
    );

    let confirmed_a = repo
        .create(finance(user_id, FinanceType::Receita, 3000.0))
        .await
        .unwrap();
    let confirmed_b = repo
        .create(finance(user_id, FinanceType::Receita, 2000.0))
        .await
        .unwrap();
    let pending = repo
        .create(finance(user_id, FinanceType::Receita, 999.0))
        .await
        .unwrap();
    let expense = repo
        .create(finance(user_id, FinanceType::Despesa, 1500.0))
        .await
        .unwrap();

    for f in [&confirmed_a, &confirmed_b, &expense] {
        repo.update(
            f.id,
            FinanceChanges {
                status: Some(FinanceStatus::Confirmada),
                data_pagamento: Some(Some(Utc::now())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    // Pending rows do not contribute.
    let _ = pending;
    assert_eq!(
        repo.sum_by_user_id(user_id, FinanceType::Receita)
            .await
            .unwrap(),
        5000.0
    );
    assert_eq!(
        repo.sum_by_user_id(user_id, FinanceType::Despesa)
            .await
            .unwrap(),
        1500.0
    );

    // Deleted rows do not contribute either.
    repo.delete(confirmed_b.id).await.unwrap();
    assert_eq!(
        repo.sum_by_user_id(user_id, FinanceType::Receita)
            .await
            .unwrap(),
        3000.0
    );
}
