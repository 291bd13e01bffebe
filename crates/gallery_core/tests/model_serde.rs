use gallery_core::{Album, DataAccess, DatabaseAccess, NewAlbum, NewPicture};

#[test]
fn opened_album_serializes_with_nested_pictures_and_tags() {
    let gallery = DatabaseAccess::open_in_memory().unwrap();
    let owner = gallery.create_user("owner").unwrap();
    gallery
        .create_album(&NewAlbum::new("Trip", owner.id).with_creation_date("2024-05-01 10:00:00"))
        .unwrap();
    gallery
        .add_picture_to_album_by_name(
            "Trip",
            &NewPicture::new("beach", "/p/beach.jpg").with_creation_date("2024-05-02 09:00:00"),
        )
        .unwrap();
    gallery.tag_user_in_picture("Trip", "beach", owner.id).unwrap();
    let album = gallery.open_album("Trip").unwrap();

    let json = serde_json::to_value(&album).unwrap();
    assert_eq!(json["name"], "Trip");
    assert_eq!(json["creation_date"], "2024-05-01 10:00:00");
    assert_eq!(json["pictures"][0]["location"], "/p/beach.jpg");
    assert_eq!(json["pictures"][0]["tags"][0], owner.id);

    let decoded: Album = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, album);
}

#[test]
fn missing_creation_date_is_filled_by_the_store() {
    let gallery = DatabaseAccess::open_in_memory().unwrap();
    let owner = gallery.create_user("owner").unwrap();
    let album = gallery.create_album(&NewAlbum::new("Now", owner.id)).unwrap();

    // YYYY-MM-DD HH:MM:SS
    assert_eq!(album.creation_date.len(), 19);
    assert_eq!(&album.creation_date[4..5], "-");
    assert_eq!(&album.creation_date[10..11], " ");
}
