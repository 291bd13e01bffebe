//! Command-line entry point for the gallery store.
//!
//! # Responsibility
//! - Wire configuration, logging and the store together.
//! - Run one command from argv and print its result.

use gallery_core::{DataAccess, DatabaseAccess, GalleryConfig, GalleryError, UserId};
use log::error;
use std::process::ExitCode;

const USAGE: &str = "usage: gallery_cli [users | albums | add-user <name> | stats <user_id> | top]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("gallery_core ping={}", gallery_core::ping());
        println!("gallery_core version={}", gallery_core::core_version());
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = GalleryConfig::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("logging disabled: {err}");
    }

    let result = config.open().map_err(CliError::from).and_then(|gallery| {
        let outcome = run(&gallery, &args);
        gallery.close()?;
        outcome
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage) => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
        Err(CliError::Gallery(err)) => {
            error!("event=cli_command module=cli status=error error_code={}", err.code());
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

enum CliError {
    Usage,
    Gallery(GalleryError),
}

impl From<GalleryError> for CliError {
    fn from(value: GalleryError) -> Self {
        Self::Gallery(value)
    }
}

fn run(gallery: &DatabaseAccess, args: &[String]) -> Result<(), CliError> {
    match args {
        [command] if command == "users" => {
            for user in gallery.list_users()? {
                println!("{}\t{}", user.id, user.name);
            }
        }
        [command] if command == "albums" => {
            for album in gallery.get_albums()? {
                println!(
                    "{}\t{}\towner={}\tcreated={}\tpictures={}",
                    album.id,
                    album.name,
                    album.user_id,
                    album.creation_date,
                    album.pictures.len()
                );
            }
        }
        [command, name] if command == "add-user" => {
            let user = gallery.create_user(name)?;
            println!("created user {} ({})", user.id, user.name);
        }
        [command, user_id] if command == "stats" => {
            let user_id: UserId = user_id.parse().map_err(|_| CliError::Usage)?;
            let user = gallery.get_user(user_id)?;
            println!("user: {} ({})", user.name, user.id);
            println!("albums owned: {}", gallery.count_albums_owned_of_user(user_id)?);
            println!("albums tagged: {}", gallery.count_albums_tagged_of_user(user_id)?);
            println!("tags: {}", gallery.count_tags_of_user(user_id)?);
            match gallery.average_tags_per_album_of_user(user_id) {
                Ok(average) => println!("average tags per album: {average:.2}"),
                Err(GalleryError::NotFound(_)) => println!("average tags per album: n/a"),
                Err(err) => return Err(err.into()),
            }
        }
        [command] if command == "top" => {
            match gallery.get_top_tagged_user() {
                Ok(user) => println!("top tagged user: {} ({})", user.name, user.id),
                Err(GalleryError::NotFound(_)) => println!("top tagged user: none"),
                Err(err) => return Err(err.into()),
            }
            match gallery.get_top_tagged_picture() {
                Ok(picture) => println!(
                    "top tagged picture: {} ({} tags)",
                    picture.name,
                    picture.tag_count()
                ),
                Err(GalleryError::NotFound(_)) => println!("top tagged picture: none"),
                Err(err) => return Err(err.into()),
            }
        }
        _ => return Err(CliError::Usage),
    }
    Ok(())
}
