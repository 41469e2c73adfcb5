//! Integration tests for organization lifecycle synchronization.

mod common;

use common::{
    count_organizations, deleted_payload, organization_payload, user_payload, TestHarness,
};
use server_core::domains::organizations::activities::{
    create_organization, delete_organization, update_organization, CreateOrganizationOutcome,
    UpdateOrganizationOutcome,
};
use server_core::domains::organizations::actions::upsert_organization_user_settings;
use server_core::domains::organizations::cache::{
    revalidate_org_user_settings_cache, revalidate_organization_cache,
};
use server_core::domains::organizations::models::{Organization, OrganizationUserSettings};
use server_core::domains::users::activities::create_user;
use test_context::test_context;

// =============================================================================
// organization.created / organization.updated
// =============================================================================

/// A created event inserts the organization and stales its tags.
#[test_context(TestHarness)]
#[tokio::test]
async fn created_inserts_organization_and_stales_tags(ctx: &TestHarness) {
    let organization = organization_payload("org_created_1", "Initech")
        .into_synced_organization()
        .unwrap();

    let outcome = create_organization(&organization, &ctx.deps).await.unwrap();
    assert_eq!(outcome, CreateOrganizationOutcome::Created);

    revalidate_organization_cache(&ctx.deps.cache, &organization.id)
        .await
        .unwrap();

    let stored = Organization::find_by_id("org_created_1", &ctx.db_pool)
        .await
        .unwrap()
        .expect("organization row should exist");
    assert_eq!(stored.name, "Initech");

    assert_eq!(
        ctx.tag_store.recorded().await,
        vec!["global:organizations", "id:organizations-org_created_1"]
    );
}

/// Duplicate created deliveries leave exactly one row.
#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_created_is_a_noop(ctx: &TestHarness) {
    let organization = organization_payload("org_dup_1", "Globex")
        .into_synced_organization()
        .unwrap();

    let first = create_organization(&organization, &ctx.deps).await.unwrap();
    let second = create_organization(&organization, &ctx.deps).await.unwrap();

    assert_eq!(first, CreateOrganizationOutcome::Created);
    assert_eq!(second, CreateOrganizationOutcome::AlreadyExists);
    assert_eq!(count_organizations("org_dup_1", &ctx.db_pool).await.unwrap(), 1);
}

/// An update delivered before its create materializes the row.
#[test_context(TestHarness)]
#[tokio::test]
async fn out_of_order_update_creates_the_row(ctx: &TestHarness) {
    let organization = organization_payload("org_ooo_1", "Early Corp")
        .into_synced_organization()
        .unwrap();

    let outcome = update_organization(&organization, &ctx.deps).await.unwrap();
    assert_eq!(outcome, UpdateOrganizationOutcome::Created);
    assert_eq!(count_organizations("org_ooo_1", &ctx.db_pool).await.unwrap(), 1);
}

/// An update overwrites the mutable fields of an existing row.
#[test_context(TestHarness)]
#[tokio::test]
async fn updated_overwrites_mutable_fields(ctx: &TestHarness) {
    let organization = organization_payload("org_upd_1", "Before Inc")
        .into_synced_organization()
        .unwrap();
    create_organization(&organization, &ctx.deps).await.unwrap();

    let changed = organization_payload("org_upd_1", "After Inc")
        .into_synced_organization()
        .unwrap();
    let outcome = update_organization(&changed, &ctx.deps).await.unwrap();
    assert_eq!(outcome, UpdateOrganizationOutcome::Updated);

    let stored = Organization::find_by_id("org_upd_1", &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "After Inc");
}

// =============================================================================
// organization.deleted
// =============================================================================

/// Deleting an organization cascades its settings pairs and reports which
/// users held them, so their scoped tags can be staled.
#[test_context(TestHarness)]
#[tokio::test]
async fn deleted_cascades_settings_and_stales_scoped_tags(ctx: &TestHarness) {
    let organization = organization_payload("org_del_1", "Doomed LLC")
        .into_synced_organization()
        .unwrap();
    create_organization(&organization, &ctx.deps).await.unwrap();

    let member = user_payload("org_del_member_1", "member@example.com")
        .into_synced_user()
        .unwrap();
    create_user(&member, &ctx.deps).await.unwrap();

    upsert_organization_user_settings("org_del_1", "org_del_member_1", true, Some(3), &ctx.deps)
        .await
        .unwrap();
    ctx.tag_store.clear().await;

    let outcome = delete_organization("org_del_1", &ctx.deps).await.unwrap();
    assert!(outcome.deleted);
    assert_eq!(outcome.settings_user_ids, vec!["org_del_member_1"]);

    // The invalidation step the handler runs after reconciling:
    revalidate_organization_cache(&ctx.deps.cache, "org_del_1")
        .await
        .unwrap();
    for user_id in &outcome.settings_user_ids {
        revalidate_org_user_settings_cache(&ctx.deps.cache, "org_del_1", user_id)
            .await
            .unwrap();
    }

    assert_eq!(count_organizations("org_del_1", &ctx.db_pool).await.unwrap(), 0);
    assert!(
        OrganizationUserSettings::find("org_del_1", "org_del_member_1", &ctx.db_pool)
            .await
            .unwrap()
            .is_none()
    );

    assert_eq!(
        ctx.tag_store.recorded().await,
        vec![
            "global:organizations",
            "id:organizations-org_del_1",
            "global:organizationUserSettings",
            "id:organizationUserSettings-org_del_1-org_del_member_1",
            "organizations:org_del_1-organizationUserSettings",
        ]
    );
}

/// Deleting a missing organization succeeds with nothing to report.
#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_missing_organization_is_a_noop(ctx: &TestHarness) {
    let id = deleted_payload("org_never_existed").into_id().unwrap();
    let outcome = delete_organization(&id, &ctx.deps).await.unwrap();
    assert!(!outcome.deleted);
    assert!(outcome.settings_user_ids.is_empty());
}

// =============================================================================
// organization user settings write path
// =============================================================================

/// Upserting a settings pair twice keeps one row and stales the same tags
/// both times.
#[test_context(TestHarness)]
#[tokio::test]
async fn settings_upsert_is_idempotent(ctx: &TestHarness) {
    let organization = organization_payload("org_set_1", "Settings Inc")
        .into_synced_organization()
        .unwrap();
    create_organization(&organization, &ctx.deps).await.unwrap();

    let member = user_payload("org_set_member_1", "settings@example.com")
        .into_synced_user()
        .unwrap();
    create_user(&member, &ctx.deps).await.unwrap();
    ctx.tag_store.clear().await;

    upsert_organization_user_settings("org_set_1", "org_set_member_1", true, None, &ctx.deps)
        .await
        .unwrap();
    let settings =
        upsert_organization_user_settings("org_set_1", "org_set_member_1", false, Some(4), &ctx.deps)
            .await
            .unwrap();

    assert!(!settings.new_application_email_notifications);
    assert_eq!(settings.minimum_rating, Some(4));

    let tags = ctx.tag_store.recorded().await;
    assert_eq!(tags.len(), 6);
    assert_eq!(&tags[..3], &tags[3..]);
    assert_eq!(tags[0], "global:organizationUserSettings");
    assert_eq!(tags[2], "organizations:org_set_1-organizationUserSettings");
}
