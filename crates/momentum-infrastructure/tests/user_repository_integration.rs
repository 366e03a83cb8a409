use momentum_domain::shared::{DomainError, UserId};
use momentum_domain::user::{User, UserRepository};
use momentum_infrastructure::persistence::repositories::SqliteUserRepository;

mod test_helpers;

#[tokio::test]
async fn user_repo_create_and_find_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(pool.clone());

    let user = User::new("alice", "hash".to_string()).expect("user");
    repo.create(&user).await.expect("create");

    let by_id = repo
        .find_by_id(user.id())
        .await
        .expect("find")
        .expect("should exist");
    assert_eq!(by_id.username(), "alice");
    assert_eq!(by_id.password_hash(), "hash");

    let by_name = repo
        .find_by_username("ALICE")
        .await
        .expect("find by name")
        .expect("username lookup ignores case");
    assert_eq!(by_name.id(), user.id());

    assert!(repo.find_by_id(&UserId::new()).await.expect("find").is_none());
}

#[tokio::test]
async fn user_repo_duplicate_username_is_conflict() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(pool.clone());

    repo.create(&User::new("bob", "h1".to_string()).unwrap())
        .await
        .expect("first create");

    let err = repo
        .create(&User::new("Bob", "h2".to_string()).unwrap())
        .await
        .expect_err("duplicate must fail");
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn user_repo_delete_cascades_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let user = test_helpers::create_user(&pool, "carol").await;

    sqlx::query(
        "INSERT INTO habits (id, user_id, name, completed, streak, created_at, updated_at) \
         VALUES ('h1', ?1, 'Read', 0, 0, datetime('now'), datetime('now'))",
    )
    .bind(user.id().as_str())
    .execute(&*pool)
    .await
    .expect("insert habit");

    let ids = repo.find_all_ids().await.expect("ids");
    assert_eq!(ids, vec![user.id().clone()]);

    assert!(repo.delete(user.id()).await.expect("delete"));
    assert!(!repo.delete(user.id()).await.expect("second delete"));

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM habits")
        .fetch_one(&*pool)
        .await
        .expect("count");
    assert_eq!(remaining, 0);
}
