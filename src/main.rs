use clap::Parser;
use podiary::application::{
    clear_entries, init::init, list_entries, CameraService, CaptureService, ConfigService,
    ExportService, ImportService,
};
use podiary::cli::{
    format_entry_list, format_export_report, format_import_report, format_note_summaries, Cli,
    Commands,
};
use podiary::error::DiaryError;
use podiary::infrastructure::logging::init_logging;
use podiary::infrastructure::FileSystemRepository;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), DiaryError> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized podiary diary at {}", path.display());
            Ok(())
        }
        Commands::Capture { note, frame } => {
            let repo = FileSystemRepository::discover()?;
            let entry = CaptureService::new(repo).execute(&note, &frame)?;
            println!("Captured '{}' ({})", entry.note, entry.id);
            Ok(())
        }
        Commands::List { note, limit } => {
            let repo = FileSystemRepository::discover()?;
            let entries = list_entries::list_entries(&repo, note.as_deref(), limit)?;
            print!("{}", format_entry_list(&entries));
            if entries.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Notes => {
            let repo = FileSystemRepository::discover()?;
            let summaries = list_entries::list_notes(&repo)?;
            print!("{}", format_note_summaries(&summaries));
            if summaries.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Export { output } => {
            let repo = FileSystemRepository::discover()?;
            let (path, report) = ExportService::new(repo).execute(output)?;
            print!("{}", format_export_report(&path, &report));
            Ok(())
        }
        Commands::Import { archive } => {
            let repo = FileSystemRepository::discover()?;
            let report = ImportService::new(repo).execute(&archive)?;
            print!("{}", format_import_report(&report));
            Ok(())
        }
        Commands::Camera { device_id, reset } => {
            let repo = FileSystemRepository::discover()?;
            let service = CameraService::new(repo);

            if reset {
                service.reset()?;
                println!("Camera selection cleared");
            } else if let Some(id) = device_id {
                service.set(&id)?;
                println!("Selected camera {}", id.trim());
            } else {
                match service.get()? {
                    Some(id) => println!("{}", id),
                    None => println!("No camera selected"),
                }
            }
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("archive_name = {}", config.archive_name);
                println!("jpeg_quality = {}", config.jpeg_quality);
                match config.storage_quota {
                    Some(quota) => println!("storage_quota = {}", quota),
                    None => println!("storage_quota = none"),
                }
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: podiary config [--list | <key> [<value>]]");
                println!("Valid keys: archive_name, jpeg_quality, storage_quota, created");
                Ok(())
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                return Err(DiaryError::Config(
                    "Refusing to delete all entries without --yes".to_string(),
                ));
            }
            let repo = FileSystemRepository::discover()?;
            let count = clear_entries(&repo)?;
            println!("Deleted {} entries", count);
            Ok(())
        }
    }
}
