use gallery_core::repo::row::DecodeError;
use gallery_core::{DataAccess, DatabaseAccess, GalleryError, NewAlbum, NewPicture, User};

fn gallery_with_owner() -> (DatabaseAccess, User) {
    let gallery = DatabaseAccess::open_in_memory().unwrap();
    let owner = gallery.create_user("owner").unwrap();
    (gallery, owner)
}

#[test]
fn create_then_delete_album_toggles_existence() {
    let (gallery, owner) = gallery_with_owner();
    gallery
        .create_album(&NewAlbum::new("Trip", owner.id).with_creation_date("2024-05-01 10:00:00"))
        .unwrap();
    gallery
        .add_picture_to_album_by_name("Trip", &NewPicture::new("beach", "/photos/beach.jpg"))
        .unwrap();
    assert!(gallery.does_album_exist("Trip", owner.id).unwrap());

    gallery.delete_album("Trip", owner.id).unwrap();

    assert!(!gallery.does_album_exist("Trip", owner.id).unwrap());
    let err = gallery.open_album("Trip").unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));
}

#[test]
fn delete_album_is_scoped_to_owner() {
    let (gallery, first) = gallery_with_owner();
    let second = gallery.create_user("second").unwrap();
    gallery.create_album(&NewAlbum::new("Shared name", first.id)).unwrap();
    gallery.create_album(&NewAlbum::new("Shared name", second.id)).unwrap();

    gallery.delete_album("Shared name", second.id).unwrap();

    assert!(gallery.does_album_exist("Shared name", first.id).unwrap());
    assert!(!gallery.does_album_exist("Shared name", second.id).unwrap());
    let err = gallery.delete_album("Shared name", second.id).unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));
}

#[test]
fn open_album_collapses_tag_rows_per_picture() {
    let (gallery, owner) = gallery_with_owner();
    let friend = gallery.create_user("friend").unwrap();
    gallery.create_album(&NewAlbum::new("Trip", owner.id)).unwrap();
    for name in ["beach", "hills", "lake"] {
        gallery
            .add_picture_to_album_by_name("Trip", &NewPicture::new(name, format!("/p/{name}.jpg")))
            .unwrap();
    }
    gallery.tag_user_in_picture("Trip", "beach", friend.id).unwrap();
    gallery.tag_user_in_picture("Trip", "beach", owner.id).unwrap();
    gallery.tag_user_in_picture("Trip", "hills", friend.id).unwrap();

    let album = gallery.open_album("Trip").unwrap();

    assert_eq!(album.user_id, owner.id);
    let summary: Vec<(&str, usize)> = album
        .pictures
        .iter()
        .map(|picture| (picture.name.as_str(), picture.tag_count()))
        .collect();
    assert_eq!(summary, vec![("beach", 2), ("hills", 1), ("lake", 0)]);
    assert!(album
        .pictures
        .iter()
        .all(|picture| picture.album_id == album.id));
    gallery.close_album(album);
}

#[test]
fn album_without_pictures_opens_empty() {
    let (gallery, owner) = gallery_with_owner();
    gallery.create_album(&NewAlbum::new("Empty", owner.id)).unwrap();

    let album = gallery.open_album("Empty").unwrap();
    assert_eq!(album.name, "Empty");
    assert!(album.pictures.is_empty());
}

#[test]
fn duplicate_names_are_integrity_errors() {
    let (gallery, owner) = gallery_with_owner();
    gallery.create_album(&NewAlbum::new("Trip", owner.id)).unwrap();
    let err = gallery.create_album(&NewAlbum::new("Trip", owner.id)).unwrap_err();
    assert!(matches!(err, GalleryError::Integrity(_)));

    let picture = NewPicture::new("beach", "/p/beach.jpg");
    gallery.add_picture_to_album_by_name("Trip", &picture).unwrap();
    let err = gallery.add_picture_to_album_by_name("Trip", &picture).unwrap_err();
    assert!(matches!(err, GalleryError::Integrity(_)));

    gallery.tag_user_in_picture("Trip", "beach", owner.id).unwrap();
    let err = gallery.tag_user_in_picture("Trip", "beach", owner.id).unwrap_err();
    assert!(matches!(err, GalleryError::Integrity(_)));
}

#[test]
fn album_for_unknown_owner_is_integrity_error() {
    let gallery = DatabaseAccess::open_in_memory().unwrap();
    let err = gallery.create_album(&NewAlbum::new("Orphan", 404)).unwrap_err();
    assert!(matches!(err, GalleryError::Integrity(_)));
}

#[test]
fn picture_operations_on_missing_targets_are_not_found() {
    let (gallery, owner) = gallery_with_owner();
    let err = gallery
        .add_picture_to_album_by_name("Nowhere", &NewPicture::new("beach", "/p/beach.jpg"))
        .unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));

    gallery.create_album(&NewAlbum::new("Trip", owner.id)).unwrap();
    let err = gallery.tag_user_in_picture("Trip", "ghost", owner.id).unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));
    let err = gallery.remove_picture_from_album_by_name("Trip", "ghost").unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));
}

#[test]
fn untag_and_remove_picture_update_the_album() {
    let (gallery, owner) = gallery_with_owner();
    gallery.create_album(&NewAlbum::new("Trip", owner.id)).unwrap();
    let added = gallery
        .add_picture_to_album_by_name(
            "Trip",
            &NewPicture::new("beach", "/p/beach.jpg").with_creation_date("2024-06-01 08:30:00"),
        )
        .unwrap();
    assert_eq!(added.creation_date, "2024-06-01 08:30:00");
    assert_eq!(added.location, "/p/beach.jpg");
    gallery.tag_user_in_picture("Trip", "beach", owner.id).unwrap();

    gallery.untag_user_in_picture("Trip", "beach", owner.id).unwrap();
    let err = gallery
        .untag_user_in_picture("Trip", "beach", owner.id)
        .unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));
    assert_eq!(gallery.open_album("Trip").unwrap().pictures[0].tag_count(), 0);

    gallery.remove_picture_from_album_by_name("Trip", "beach").unwrap();
    assert!(gallery.open_album("Trip").unwrap().pictures.is_empty());
}

#[test]
fn rename_album_keeps_pictures() {
    let (gallery, owner) = gallery_with_owner();
    gallery.create_album(&NewAlbum::new("Draft", owner.id)).unwrap();
    gallery
        .add_picture_to_album_by_name("Draft", &NewPicture::new("beach", "/p/beach.jpg"))
        .unwrap();

    gallery.rename_album("Draft", owner.id, "Final").unwrap();

    assert!(!gallery.does_album_exist("Draft", owner.id).unwrap());
    assert!(gallery.open_album("Final").unwrap().has_picture("beach"));
}

#[test]
fn blank_names_are_rejected_before_touching_the_store() {
    let (gallery, owner) = gallery_with_owner();

    for err in [
        gallery.create_album(&NewAlbum::new("  ", owner.id)).unwrap_err(),
        gallery.open_album("").unwrap_err(),
        gallery.delete_album("", owner.id).unwrap_err(),
        gallery
            .add_picture_to_album_by_name("Trip", &NewPicture::new("", "/p/x.jpg"))
            .unwrap_err(),
        gallery.tag_user_in_picture("Trip", " ", owner.id).unwrap_err(),
    ] {
        assert!(matches!(err, GalleryError::Validation(_)), "{err}");
    }
}

#[test]
fn hostile_names_round_trip_unchanged() {
    let (gallery, owner) = gallery_with_owner();
    let hostile = "x'); DROP TABLE Users;--";
    gallery.create_album(&NewAlbum::new(hostile, owner.id)).unwrap();
    gallery
        .add_picture_to_album_by_name(hostile, &NewPicture::new("it's \"quoted\"", "/p/q.jpg"))
        .unwrap();

    let album = gallery.open_album(hostile).unwrap();
    assert_eq!(album.name, hostile);
    assert!(album.has_picture("it's \"quoted\""));
    assert_eq!(gallery.list_users().unwrap().len(), 1);
}

#[test]
fn get_albums_lists_every_album_with_pictures() {
    let (gallery, owner) = gallery_with_owner();
    let other = gallery.create_user("other").unwrap();
    gallery.create_album(&NewAlbum::new("A", owner.id)).unwrap();
    gallery.create_album(&NewAlbum::new("B", other.id)).unwrap();
    gallery
        .add_picture_to_album_by_name("A", &NewPicture::new("one", "/p/1.jpg"))
        .unwrap();

    let albums = gallery.get_albums().unwrap();
    let names: Vec<&str> = albums.iter().map(|album| album.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(albums[0].pictures.len(), 1);

    let of_other = gallery.get_albums_of_user(other.id).unwrap();
    assert_eq!(of_other.len(), 1);
    assert_eq!(of_other[0].name, "B");
}

#[test]
fn shared_album_name_is_rejected_instead_of_picking_an_owner() {
    let gallery = DatabaseAccess::open_in_memory().unwrap();
    let first = gallery.create_user("first").unwrap();
    let second = gallery.create_user("second").unwrap();
    gallery.create_album(&NewAlbum::new("Trip", first.id)).unwrap();
    gallery
        .add_picture_to_album_by_name("Trip", &NewPicture::new("beach", "/p/beach.jpg"))
        .unwrap();
    gallery.create_album(&NewAlbum::new("Trip", second.id)).unwrap();

    let picture = NewPicture::new("hills", "/p/hills.jpg");
    for err in [
        gallery.open_album("Trip").unwrap_err(),
        gallery.add_picture_to_album_by_name("Trip", &picture).unwrap_err(),
        gallery.remove_picture_from_album_by_name("Trip", "beach").unwrap_err(),
        gallery.tag_user_in_picture("Trip", "beach", second.id).unwrap_err(),
        gallery.untag_user_in_picture("Trip", "beach", second.id).unwrap_err(),
    ] {
        assert!(matches!(err, GalleryError::Integrity(_)), "{err}");
    }

    let first_albums = gallery.get_albums_of_user(first.id).unwrap();
    assert_eq!(first_albums[0].pictures.len(), 1);
    assert_eq!(first_albums[0].pictures[0].tag_count(), 0);
    assert!(gallery.get_albums_of_user(second.id).unwrap()[0]
        .pictures
        .is_empty());

    // Once the name is unique again, it addresses the remaining album.
    gallery.delete_album("Trip", first.id).unwrap();
    gallery.add_picture_to_album_by_name("Trip", &picture).unwrap();
    let album = gallery.open_album("Trip").unwrap();
    assert_eq!(album.user_id, second.id);
    assert!(album.has_picture("hills"));
}

#[test]
fn malformed_stored_value_surfaces_as_decode_error() {
    let conn = gallery_core::db::open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA foreign_keys = OFF;
         INSERT INTO Users (ID, NAME) VALUES (1, 'owner');
         INSERT INTO Albums (ID, NAME, CREATION_DATE, USER_ID)
             VALUES (1, 'Trip', '2024-05-01 10:00:00', 1);
         INSERT INTO Pictures (ID, NAME, LOCATION, CREATION_DATE, ALBUM_ID)
             VALUES (1, 'beach', '/p/beach.jpg', '2024-05-01 10:00:00', 1);
         INSERT INTO Tags (PICTURE_ID, USER_ID) VALUES (1, 'abc');",
    )
    .unwrap();
    let gallery = DatabaseAccess::from_connection(conn).unwrap();

    let err = gallery.open_album("Trip").unwrap_err();
    assert_eq!(err.code(), "decode");
    match err {
        GalleryError::Decode(DecodeError::InvalidInteger { column, value }) => {
            assert_eq!(column, "tag_user_id");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}
