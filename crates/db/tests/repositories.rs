//! Integration tests for the repository layer.
//!
//! Exercises scoping, merge updates, the association uniqueness constraint,
//! join ordering, and the cascade/restrict choices of the schema against a
//! real database.

use sqlx::PgPool;
use studio_core::gallery::CurationFlag;
use studio_core::roles::Role;
use studio_core::scope::Scope;
use studio_core::types::DbId;
use studio_db::models::gallery::{CreateGallery, UpdateGallery};
use studio_db::models::photo::CreatePhoto;
use studio_db::models::photo_session::{CreatePhotoSession, UpdatePhotoSession};
use studio_db::models::user::{CreateUser, UpdateUser, User};
use studio_db::repositories::{
    GalleryPhotoRepo, GalleryRepo, PhotoRepo, PhotoSessionRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str, role: Role, photographer_id: Option<DbId>) -> User {
    let mut conn = pool.acquire().await.unwrap();
    UserRepo::create(
        &mut conn,
        &CreateUser {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            role,
            photographer_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

fn new_gallery(name: &str, photographer_id: DbId, client_id: Option<DbId>) -> CreateGallery {
    CreateGallery {
        name: name.to_string(),
        description: None,
        photographer_id,
        client_id,
    }
}

/// Create a session owned by `photographer_id` holding `count` photos.
async fn session_with_photos(pool: &PgPool, photographer_id: DbId, count: usize) -> Vec<DbId> {
    let mut conn = pool.acquire().await.unwrap();
    let session = PhotoSessionRepo::create(
        &mut conn,
        &CreatePhotoSession {
            name: "Studio shoot".to_string(),
            date: chrono::Utc::now(),
            photographer_id,
        },
    )
    .await
    .unwrap();

    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let photo = PhotoRepo::create(
            &mut conn,
            &CreatePhoto {
                description: format!("frame {i}"),
                path: format!("/sessions/{}/{i}.jpg", session.id),
                session_id: session.id,
            },
        )
        .await
        .unwrap();
        ids.push(photo.id);
    }
    ids
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23503"),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    new_user(&pool, "dup@studio.test", Role::Photographer, None).await;

    let mut conn = pool.acquire().await.unwrap();
    let err = UserRepo::create(
        &mut conn,
        &CreateUser {
            name: "Again".to_string(),
            email: "dup@studio.test".to_string(),
            password_hash: "x".to_string(),
            role: Role::Photographer,
            photographer_id: None,
        },
    )
    .await
    .unwrap_err();

    assert!(is_unique_violation(&err, "uq_users_email"), "got: {err:?}");
}

#[sqlx::test(migrations = "./migrations")]
async fn client_without_photographer_is_rejected_by_schema(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = UserRepo::create(
        &mut conn,
        &CreateUser {
            name: "Orphan".to_string(),
            email: "orphan@studio.test".to_string(),
            password_hash: "x".to_string(),
            role: Role::Client,
            photographer_id: None,
        },
    )
    .await;

    assert!(result.is_err(), "client rows must carry a photographer_id");
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_update_keeps_every_field(pool: PgPool) {
    let user = new_user(&pool, "keep@studio.test", Role::Photographer, None).await;

    let mut conn = pool.acquire().await.unwrap();
    let updated = UserRepo::update(&mut conn, user.id, &UpdateUser::default())
        .await
        .unwrap()
        .expect("user should exist");

    assert_eq!(updated.name, user.name);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.password_hash, user.password_hash);
    assert_eq!(updated.role, user.role);
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_merges(pool: PgPool) {
    let user = new_user(&pool, "merge@studio.test", Role::Photographer, None).await;

    let mut conn = pool.acquire().await.unwrap();
    let updated = UserRepo::update(
        &mut conn,
        user.id,
        &UpdateUser {
            name: Some("Renamed".to_string()),
            ..UpdateUser::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "merge@studio.test");
    assert_eq!(updated.password_hash, user.password_hash);
}

#[sqlx::test(migrations = "./migrations")]
async fn user_scopes(pool: PgPool) {
    let p1 = new_user(&pool, "p1@studio.test", Role::Photographer, None).await;
    let p2 = new_user(&pool, "p2@studio.test", Role::Photographer, None).await;
    let c1 = new_user(&pool, "c1@studio.test", Role::Client, Some(p1.id)).await;
    let c2 = new_user(&pool, "c2@studio.test", Role::Client, Some(p2.id)).await;

    let mut conn = pool.acquire().await.unwrap();

    let all = UserRepo::list(&mut conn, &Scope::All).await.unwrap();
    assert_eq!(all.len(), 4);

    let mine = UserRepo::list(&mut conn, &Scope::OwnedBy(p1.id)).await.unwrap();
    let ids: Vec<DbId> = mine.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![c1.id]);

    let in_scope = UserRepo::find_by_id_scoped(&mut conn, c1.id, &Scope::OwnedBy(p1.id))
        .await
        .unwrap();
    assert!(in_scope.is_some());

    let out_of_scope = UserRepo::find_by_id_scoped(&mut conn, c2.id, &Scope::OwnedBy(p1.id))
        .await
        .unwrap();
    assert!(out_of_scope.is_none(), "foreign client must look absent");

    let myself = UserRepo::find_by_id_scoped(&mut conn, c1.id, &Scope::AssignedTo(c1.id))
        .await
        .unwrap();
    assert!(myself.is_some());
}

// ---------------------------------------------------------------------------
// Galleries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn gallery_list_respects_scope(pool: PgPool) {
    let p1 = new_user(&pool, "p1@studio.test", Role::Photographer, None).await;
    let p2 = new_user(&pool, "p2@studio.test", Role::Photographer, None).await;
    let c1 = new_user(&pool, "c1@studio.test", Role::Client, Some(p1.id)).await;

    let mut conn = pool.acquire().await.unwrap();
    let g1 = GalleryRepo::create(&mut conn, &new_gallery("A", p1.id, Some(c1.id)))
        .await
        .unwrap();
    let g2 = GalleryRepo::create(&mut conn, &new_gallery("B", p2.id, None))
        .await
        .unwrap();

    let owned = GalleryRepo::list(&mut conn, &Scope::OwnedBy(p1.id)).await.unwrap();
    assert!(owned.iter().all(|g| g.photographer_id == p1.id));
    assert_eq!(owned.len(), 1);

    let assigned = GalleryRepo::list(&mut conn, &Scope::AssignedTo(c1.id))
        .await
        .unwrap();
    assert_eq!(assigned.iter().map(|g| g.id).collect::<Vec<_>>(), vec![g1.id]);

    let all = GalleryRepo::list(&mut conn, &Scope::All).await.unwrap();
    assert_eq!(all.iter().map(|g| g.id).collect::<Vec<_>>(), vec![g1.id, g2.id]);

    let hidden = GalleryRepo::find_by_id_scoped(&mut conn, g2.id, &Scope::AssignedTo(c1.id))
        .await
        .unwrap();
    assert!(hidden.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_association_violates_unique_constraint(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let photos = session_with_photos(&pool, p.id, 1).await;

    let mut conn = pool.acquire().await.unwrap();
    let gallery = GalleryRepo::create(&mut conn, &new_gallery("G", p.id, None))
        .await
        .unwrap();

    let first = GalleryPhotoRepo::attach(&mut conn, gallery.id, photos[0]).await.unwrap();
    assert!(!first.selected);
    assert!(!first.favorite);

    let err = GalleryPhotoRepo::attach(&mut conn, gallery.id, photos[0])
        .await
        .unwrap_err();
    assert!(
        is_unique_violation(&err, "uq_gallery_photos_gallery_photo"),
        "got: {err:?}"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn photos_in_gallery_follow_association_order(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let photos = session_with_photos(&pool, p.id, 3).await;

    let mut conn = pool.acquire().await.unwrap();
    let gallery = GalleryRepo::create(&mut conn, &new_gallery("G", p.id, None))
        .await
        .unwrap();

    // Attach out of photo-id order; the view follows association order.
    for photo_id in [photos[2], photos[0], photos[1]] {
        GalleryPhotoRepo::attach(&mut conn, gallery.id, photo_id).await.unwrap();
    }

    let view = GalleryPhotoRepo::list_photos_in_gallery(&mut conn, gallery.id)
        .await
        .unwrap();
    let ids: Vec<DbId> = view.iter().map(|p| p.photo_id).collect();
    assert_eq!(ids, vec![photos[2], photos[0], photos[1]]);
    assert!(view.windows(2).all(|w| w[0].gallery_photo_id < w[1].gallery_photo_id));
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_gallery_lists_no_photos(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let mut conn = pool.acquire().await.unwrap();
    let gallery = GalleryRepo::create(&mut conn, &new_gallery("Empty", p.id, None))
        .await
        .unwrap();

    let view = GalleryPhotoRepo::list_photos_in_gallery(&mut conn, gallery.id)
        .await
        .unwrap();
    assert!(view.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn set_flag_touches_one_column(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let photos = session_with_photos(&pool, p.id, 1).await;

    let mut conn = pool.acquire().await.unwrap();
    let gallery = GalleryRepo::create(&mut conn, &new_gallery("G", p.id, None))
        .await
        .unwrap();
    let row = GalleryPhotoRepo::attach(&mut conn, gallery.id, photos[0]).await.unwrap();

    let row = GalleryPhotoRepo::set_flag(&mut conn, row.id, CurationFlag::Favorite, true)
        .await
        .unwrap()
        .unwrap();
    assert!(row.favorite);
    assert!(!row.selected);

    let row = GalleryPhotoRepo::set_flag(&mut conn, row.id, CurationFlag::Selected, true)
        .await
        .unwrap()
        .unwrap();
    assert!(row.favorite);
    assert!(row.selected);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_gallery_cascades_to_associations(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let photos = session_with_photos(&pool, p.id, 2).await;

    let mut conn = pool.acquire().await.unwrap();
    let gallery = GalleryRepo::create(&mut conn, &new_gallery("G", p.id, None))
        .await
        .unwrap();
    for photo_id in &photos {
        GalleryPhotoRepo::attach(&mut conn, gallery.id, *photo_id).await.unwrap();
    }

    assert!(GalleryRepo::delete(&mut conn, gallery.id).await.unwrap());

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM gallery_photos")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // The photos themselves survive.
    assert!(PhotoRepo::find_by_id(&mut conn, photos[0]).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_attached_photo_is_restricted(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let photos = session_with_photos(&pool, p.id, 1).await;

    let mut conn = pool.acquire().await.unwrap();
    let gallery = GalleryRepo::create(&mut conn, &new_gallery("G", p.id, None))
        .await
        .unwrap();
    GalleryPhotoRepo::attach(&mut conn, gallery.id, photos[0]).await.unwrap();

    let err = PhotoRepo::delete(&mut conn, photos[0]).await.unwrap_err();
    assert!(is_foreign_key_violation(&err), "got: {err:?}");

    assert!(GalleryPhotoRepo::detach(&mut conn, gallery.id, photos[0]).await.unwrap());
    assert!(PhotoRepo::delete(&mut conn, photos[0]).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn photo_owner_resolves_through_session(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let photos = session_with_photos(&pool, p.id, 1).await;

    let mut conn = pool.acquire().await.unwrap();
    assert_eq!(PhotoRepo::find_owner_id(&mut conn, photos[0]).await.unwrap(), Some(p.id));
    assert_eq!(PhotoRepo::find_owner_id(&mut conn, 9_999).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn sessions_never_match_assignee_scope(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    session_with_photos(&pool, p.id, 0).await;

    let mut conn = pool.acquire().await.unwrap();
    let owned = PhotoSessionRepo::list(&mut conn, &Scope::OwnedBy(p.id)).await.unwrap();
    assert_eq!(owned.len(), 1);

    let assigned = PhotoSessionRepo::list(&mut conn, &Scope::AssignedTo(p.id))
        .await
        .unwrap();
    assert!(assigned.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn nothing_scope_matches_no_gallery(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let mut conn = pool.acquire().await.unwrap();
    let g = GalleryRepo::create(&mut conn, &new_gallery("Open", p.id, None))
        .await
        .unwrap();

    let found = GalleryRepo::find_by_id_scoped(&mut conn, g.id, &Scope::Nothing)
        .await
        .unwrap();
    assert!(found.is_none());
    assert!(GalleryRepo::list(&mut conn, &Scope::Nothing).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn gallery_update_merges_and_reassigns(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    let c = new_user(&pool, "c@studio.test", Role::Client, Some(p.id)).await;
    let mut conn = pool.acquire().await.unwrap();
    let mut input = new_gallery("Wedding", p.id, Some(c.id));
    input.description = Some("June".to_string());
    let g = GalleryRepo::create(&mut conn, &input).await.unwrap();

    let same = GalleryRepo::update(&mut conn, g.id, &UpdateGallery::default())
        .await
        .unwrap()
        .expect("gallery exists");
    assert_eq!(same.name, "Wedding");
    assert_eq!(same.description.as_deref(), Some("June"));
    assert_eq!(same.client_id, Some(c.id));

    let renamed = GalleryRepo::update(
        &mut conn,
        g.id,
        &UpdateGallery {
            name: Some("Wedding (final)".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Wedding (final)");
    assert_eq!(renamed.client_id, Some(c.id));

    let unassigned = GalleryRepo::update(
        &mut conn,
        g.id,
        &UpdateGallery {
            client_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(unassigned.client_id, None);
    assert_eq!(unassigned.photographer_id, p.id);

    let missing = GalleryRepo::update(&mut conn, 9_999, &UpdateGallery::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn session_update_merges(pool: PgPool) {
    let p = new_user(&pool, "p@studio.test", Role::Photographer, None).await;
    session_with_photos(&pool, p.id, 0).await;

    let mut conn = pool.acquire().await.unwrap();
    let session = PhotoSessionRepo::list(&mut conn, &Scope::OwnedBy(p.id))
        .await
        .unwrap()
        .remove(0);

    let same = PhotoSessionRepo::update(&mut conn, session.id, &UpdatePhotoSession::default())
        .await
        .unwrap()
        .expect("session exists");
    assert_eq!(same.name, session.name);
    assert_eq!(same.date, session.date);

    let renamed = PhotoSessionRepo::update(
        &mut conn,
        session.id,
        &UpdatePhotoSession {
            name: Some("Outdoor shoot".to_string()),
            date: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Outdoor shoot");
    assert_eq!(renamed.date, session.date);
}
