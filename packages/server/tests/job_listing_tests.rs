//! Integration tests for listing and application write paths.
//!
//! These exercise the ordinary (non-webhook) writes and assert they stale
//! the same tag shapes the sync handlers use, including the parent-scoped
//! forms.

mod common;

use common::{organization_payload, user_payload, TestHarness};
use server_core::domains::job_listings::actions::{
    apply_to_job_listing, create_job_listing, delete_job_listing, update_application_rating,
    update_application_stage, update_job_listing_status, NewJobListing,
};
use server_core::domains::job_listings::models::{ApplicationStage, JobListing, JobListingStatus};
use server_core::domains::organizations::activities::create_organization;
use server_core::domains::users::actions::{
    record_new_job_notifications, upsert_notification_settings, upsert_user_resume,
};
use server_core::domains::users::activities::{create_user, delete_user};
use server_core::domains::users::models::{UserNotification, UserResume};
use server_core::kernel::ServerDeps;
use test_context::test_context;

async fn seed_organization(id: &str, deps: &ServerDeps) {
    let organization = organization_payload(id, "Acme Hiring")
        .into_synced_organization()
        .unwrap();
    create_organization(&organization, deps).await.unwrap();
}

async fn seed_user(id: &str, deps: &ServerDeps) {
    let user = user_payload(id, &format!("{}@example.com", id))
        .into_synced_user()
        .unwrap();
    create_user(&user, deps).await.unwrap();
}

// =============================================================================
// Listings
// =============================================================================

/// Creating a listing stales the global, id, and organization-scoped tags.
#[test_context(TestHarness)]
#[tokio::test]
async fn create_listing_stales_org_scoped_tags(ctx: &TestHarness) {
    seed_organization("org_jl_1", &ctx.deps).await;
    ctx.tag_store.clear().await;

    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_jl_1".to_string(),
            title: "Backend Engineer".to_string(),
            description: "Build the sync core".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();

    assert_eq!(listing.status, JobListingStatus::Draft.as_str());
    assert_eq!(
        ctx.tag_store.recorded().await,
        vec![
            "global:jobListings".to_string(),
            format!("id:jobListings-{}", listing.id),
            "organizations:org_jl_1-jobListings".to_string(),
        ]
    );
}

/// The first publish stamps posted_at; delisting and republishing keeps it.
#[test_context(TestHarness)]
#[tokio::test]
async fn publish_stamps_posted_at_once(ctx: &TestHarness) {
    seed_organization("org_jl_2", &ctx.deps).await;
    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_jl_2".to_string(),
            title: "Data Engineer".to_string(),
            description: "Pipelines".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();
    assert!(listing.posted_at.is_none());

    let published = update_job_listing_status(listing.id, JobListingStatus::Published, &ctx.deps)
        .await
        .unwrap();
    let first_posted_at = published.posted_at.expect("posted_at should be stamped");

    update_job_listing_status(listing.id, JobListingStatus::Delisted, &ctx.deps)
        .await
        .unwrap();
    let republished =
        update_job_listing_status(listing.id, JobListingStatus::Published, &ctx.deps)
            .await
            .unwrap();

    assert_eq!(republished.posted_at, Some(first_posted_at));
}

/// Deleting a listing stales its tags and cascades applications.
#[test_context(TestHarness)]
#[tokio::test]
async fn delete_listing_cascades_applications(ctx: &TestHarness) {
    seed_organization("org_jl_3", &ctx.deps).await;
    seed_user("user_jl_3", &ctx.deps).await;

    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_jl_3".to_string(),
            title: "SRE".to_string(),
            description: "Keep it up".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();
    apply_to_job_listing(listing.id, "user_jl_3", None, &ctx.deps)
        .await
        .unwrap();

    assert!(delete_job_listing(listing.id, &ctx.deps).await.unwrap());
    assert!(JobListing::find_by_id(listing.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());

    // Deleting again is a no-op.
    assert!(!delete_job_listing(listing.id, &ctx.deps).await.unwrap());
}

// =============================================================================
// Applications
// =============================================================================

/// Applying twice keeps the first application and both calls succeed.
#[test_context(TestHarness)]
#[tokio::test]
async fn applying_twice_keeps_the_first_application(ctx: &TestHarness) {
    seed_organization("org_app_1", &ctx.deps).await;
    seed_user("user_app_1", &ctx.deps).await;

    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_app_1".to_string(),
            title: "Designer".to_string(),
            description: "Make it pretty".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();

    let first = apply_to_job_listing(listing.id, "user_app_1", Some("hello"), &ctx.deps)
        .await
        .unwrap();
    let second = apply_to_job_listing(listing.id, "user_app_1", Some("again"), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(first.cover_letter.as_deref(), Some("hello"));
    assert_eq!(second.cover_letter.as_deref(), Some("hello"));
}

/// Stage and rating updates stale the listing-scoped application tags.
#[test_context(TestHarness)]
#[tokio::test]
async fn application_updates_stale_listing_scoped_tags(ctx: &TestHarness) {
    seed_organization("org_app_2", &ctx.deps).await;
    seed_user("user_app_2", &ctx.deps).await;

    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_app_2".to_string(),
            title: "PM".to_string(),
            description: "Plan it".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();
    apply_to_job_listing(listing.id, "user_app_2", None, &ctx.deps)
        .await
        .unwrap();
    ctx.tag_store.clear().await;

    let rated = update_application_rating(listing.id, "user_app_2", 5, &ctx.deps)
        .await
        .unwrap();
    assert_eq!(rated.rating, Some(5));

    let staged =
        update_application_stage(listing.id, "user_app_2", ApplicationStage::Interviewed, &ctx.deps)
            .await
            .unwrap();
    assert_eq!(staged.stage, ApplicationStage::Interviewed.as_str());

    let expected = vec![
        "global:jobListingApplications".to_string(),
        format!("id:jobListingApplications-{}-user_app_2", listing.id),
        format!("jobListings:{}-jobListingApplications", listing.id),
    ];
    let tags = ctx.tag_store.recorded().await;
    assert_eq!(tags.len(), 6);
    assert_eq!(&tags[..3], expected.as_slice());
    assert_eq!(&tags[3..], expected.as_slice());
}

// =============================================================================
// Resumes, notifications, settings
// =============================================================================

/// Resume upsert stales the resume tags; a re-upload clears the summary.
#[test_context(TestHarness)]
#[tokio::test]
async fn resume_upsert_and_summary_lifecycle(ctx: &TestHarness) {
    seed_user("user_res_1", &ctx.deps).await;
    ctx.tag_store.clear().await;

    upsert_user_resume("user_res_1", "https://files.example/res1.pdf", &ctx.deps)
        .await
        .unwrap();
    assert_eq!(
        ctx.tag_store.recorded().await,
        vec!["global:userResumes", "id:userResumes-user_res_1"]
    );

    server_core::domains::users::actions::set_resume_ai_summary(
        "user_res_1",
        "Strong systems background",
        &ctx.deps,
    )
    .await
    .unwrap();

    let replaced = upsert_user_resume("user_res_1", "https://files.example/res2.pdf", &ctx.deps)
        .await
        .unwrap();
    assert_eq!(replaced.resume_file_url, "https://files.example/res2.pdf");
    assert!(replaced.ai_summary.is_none());
}

/// Notification recording suppresses duplicates and stales per-user scoped
/// tags only for rows actually written.
#[test_context(TestHarness)]
#[tokio::test]
async fn notification_batch_suppresses_duplicates(ctx: &TestHarness) {
    seed_organization("org_not_1", &ctx.deps).await;
    seed_user("user_not_1", &ctx.deps).await;
    seed_user("user_not_2", &ctx.deps).await;

    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_not_1".to_string(),
            title: "Writer".to_string(),
            description: "Docs".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();

    let user_ids = vec!["user_not_1".to_string(), "user_not_2".to_string()];
    let first = record_new_job_notifications(listing.id, &user_ids, &ctx.deps)
        .await
        .unwrap();
    assert_eq!(first, 2);

    // Re-running the batch alerts nobody twice.
    let second = record_new_job_notifications(listing.id, &user_ids, &ctx.deps)
        .await
        .unwrap();
    assert_eq!(second, 0);

    let notifications = UserNotification::find_by_user("user_not_1", &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
}

/// User deletion cascades resume and notification rows.
#[test_context(TestHarness)]
#[tokio::test]
async fn user_delete_cascades_resume_and_notifications(ctx: &TestHarness) {
    seed_organization("org_cas_1", &ctx.deps).await;
    seed_user("user_cas_1", &ctx.deps).await;
    upsert_user_resume("user_cas_1", "https://files.example/cas.pdf", &ctx.deps)
        .await
        .unwrap();
    upsert_notification_settings("user_cas_1", true, Some("rust jobs"), &ctx.deps)
        .await
        .unwrap();

    let listing = create_job_listing(
        NewJobListing {
            organization_id: "org_cas_1".to_string(),
            title: "Analyst".to_string(),
            description: "Numbers".to_string(),
        },
        &ctx.deps,
    )
    .await
    .unwrap();
    record_new_job_notifications(listing.id, &["user_cas_1".to_string()], &ctx.deps)
        .await
        .unwrap();

    assert!(delete_user("user_cas_1", &ctx.deps).await.unwrap());

    assert!(UserResume::find_by_user_id("user_cas_1", &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
    assert!(UserNotification::find_by_user("user_cas_1", &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
}
