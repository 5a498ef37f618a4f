//! Integration tests for agreement, user, and linked-repository CRUD.

use clasign_db::models::agreement::{CreateAgreement, UpdateAgreement};
use clasign_db::models::linked_repository::CreateLinkedRepository;
use clasign_db::models::user::UpsertUser;
use clasign_db::repositories::{AgreementRepo, LinkedRepositoryRepo, UserRepo};
use sqlx::PgPool;

fn new_agreement(name: &str) -> CreateAgreement {
    CreateAgreement {
        name: name.to_string(),
        description: Some("The default agreement".to_string()),
        is_primary: None,
        superseding_agreement_id: None,
        individual_markdown: "# Individual".to_string(),
        individual_html: Some("<h1>Individual</h1>".to_string()),
        corporate_markdown: "# Corporate".to_string(),
        corporate_html: Some("<h1>Corporate</h1>".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_defaults_to_primary(pool: PgPool) {
    let cla = AgreementRepo::create(&pool, &new_agreement("apache"))
        .await
        .unwrap();
    assert!(cla.is_primary);

    let found = AgreementRepo::find_primary_by_name(&pool, "apache")
        .await
        .unwrap();
    assert_eq!(found.map(|a| a.id), Some(cla.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_primary_with_same_name_conflicts(pool: PgPool) {
    AgreementRepo::create(&pool, &new_agreement("apache"))
        .await
        .unwrap();

    let err = AgreementRepo::create(&pool, &new_agreement("apache"))
        .await
        .expect_err("duplicate primary must violate uq_agreements_primary_name");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_applies_only_set_fields(pool: PgPool) {
    let cla = AgreementRepo::create(&pool, &new_agreement("apache"))
        .await
        .unwrap();

    let updated = AgreementRepo::update(
        &pool,
        cla.id,
        &UpdateAgreement {
            description: Some("Updated description".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");

    assert_eq!(updated.description.as_deref(), Some("Updated description"));
    assert_eq!(updated.individual_markdown, cla.individual_markdown);
    assert_eq!(updated.name, cla.name);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_can_clear_superseding_link(pool: PgPool) {
    let old = AgreementRepo::create(
        &pool,
        &CreateAgreement {
            is_primary: Some(false),
            ..new_agreement("apache")
        },
    )
    .await
    .unwrap();
    let current = AgreementRepo::create(&pool, &new_agreement("apache"))
        .await
        .unwrap();
    AgreementRepo::update(
        &pool,
        old.id,
        &UpdateAgreement {
            superseding_agreement_id: Some(Some(current.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // An update that leaves the field unset must not touch the link.
    let untouched = AgreementRepo::update(
        &pool,
        old.id,
        &UpdateAgreement {
            description: Some("Still superseded".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");
    assert_eq!(untouched.superseding_agreement_id, Some(current.id));

    // Setting the field to null severs the chain.
    let cleared = AgreementRepo::update(
        &pool,
        old.id,
        &UpdateAgreement {
            superseding_agreement_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");
    assert_eq!(cleared.superseding_agreement_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_and_superseding_reference_check(pool: PgPool) {
    let old = AgreementRepo::create(
        &pool,
        &CreateAgreement {
            is_primary: Some(false),
            ..new_agreement("apache")
        },
    )
    .await
    .unwrap();
    let current = AgreementRepo::create(&pool, &new_agreement("apache"))
        .await
        .unwrap();
    AgreementRepo::update(
        &pool,
        old.id,
        &UpdateAgreement {
            superseding_agreement_id: Some(Some(current.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(AgreementRepo::is_referenced_as_superseding(&pool, current.id)
        .await
        .unwrap());
    assert!(!AgreementRepo::is_referenced_as_superseding(&pool, old.id)
        .await
        .unwrap());

    assert!(AgreementRepo::delete(&pool, old.id).await.unwrap());
    assert!(!AgreementRepo::delete(&pool, old.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_upsert_refreshes_profile(pool: PgPool) {
    let first = UserRepo::upsert(
        &pool,
        &UpsertUser {
            github_login: "rwinch".to_string(),
            name: Some("Rob".to_string()),
            avatar_url: None,
            emails: vec!["rob@example.com".to_string()],
            access_token: "token-1".to_string(),
            is_admin: false,
        },
    )
    .await
    .unwrap();

    let second = UserRepo::upsert(
        &pool,
        &UpsertUser {
            github_login: "rwinch".to_string(),
            name: Some("Rob Winch".to_string()),
            avatar_url: Some("https://avatars.example.com/rwinch".to_string()),
            emails: vec![
                "rob@example.com".to_string(),
                "rob@corp.example.com".to_string(),
            ],
            access_token: "token-2".to_string(),
            is_admin: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(second.id, first.id, "upsert must not create a second row");
    assert_eq!(second.name.as_deref(), Some("Rob Winch"));
    assert_eq!(second.emails.len(), 2);
    assert_eq!(second.access_token.as_deref(), Some("token-2"));
    assert!(second.is_admin);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_linked_repository_upsert_replaces(pool: PgPool) {
    let first = LinkedRepositoryRepo::upsert(
        &pool,
        &CreateLinkedRepository {
            repository: "octo/widgets".to_string(),
            agreement_name: "apache".to_string(),
            access_token: "token-1".to_string(),
        },
    )
    .await
    .unwrap();

    let second = LinkedRepositoryRepo::upsert(
        &pool,
        &CreateLinkedRepository {
            repository: "octo/widgets".to_string(),
            agreement_name: "spring".to_string(),
            access_token: "token-2".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.agreement_name, "spring");

    let all = LinkedRepositoryRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);

    let found = LinkedRepositoryRepo::find_by_repository(&pool, "octo/widgets")
        .await
        .unwrap()
        .expect("link should exist");
    assert_eq!(found.access_token, "token-2");
}
