use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use usuarios::client::{ApiClient, UsuariosApi, UsuariosApp, render};
use usuarios::config::Config;
use usuarios::logger;

/// Terminal client for the usuarios API.
#[derive(Parser, Debug)]
#[command(name = "usuarios-client")]
#[command(about = "List, create, edit and delete usuarios")]
#[command(version)]
struct Args {
    /// Base URL of the API service (defaults to API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every usuario, newest first.
    List,

    /// Print one usuario.
    Show { id: i32 },

    /// Create a usuario.
    Create {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        email: String,
    },

    /// Replace the name and email of a usuario.
    Update {
        id: i32,
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        email: String,
    },

    /// Delete a usuario after confirmation.
    Delete {
        id: i32,
        /// Skip the confirmation question.
        #[arg(long)]
        yes: bool,
    },

    /// Print the /api/alonso payload.
    Info,

    /// Print the service health.
    Health,

    /// Form-driven session (default).
    Interactive,
}

fn prompt(question: &str) -> io::Result<String> {
    print!("{} ", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> bool {
    matches!(
        prompt(&format!("{} [s/N]", question)).as_deref().map(str::trim),
        Ok("s") | Ok("S") | Ok("si") | Ok("sí") | Ok("y") | Ok("yes")
    )
}

fn report<A: UsuariosApi>(app: &UsuariosApp<A>) -> bool {
    match &app.state().error {
        Some(error) => {
            eprintln!("{}", error);
            false
        }
        None => true,
    }
}

async fn interactive(app: &mut UsuariosApp<ApiClient>) -> io::Result<()> {
    app.init().await;
    println!("{}", render(app.state()));
    println!("Comandos: nuevo | editar <id> | eliminar <id> | cancelar | actualizar | salir");

    loop {
        let line = prompt(">")?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next().map(str::parse::<i32>)) {
            (Some("salir"), _) | (Some("q"), _) => break,
            (Some("actualizar"), _) => app.load().await,
            (Some("cancelar"), _) => app.cancel_edit(),
            (Some("nuevo"), _) => {
                app.cancel_edit();
                app.draft_mut().nombre = prompt("Nombre:")?;
                app.draft_mut().email = prompt("Email:")?;
                app.submit().await;
            }
            (Some("editar"), Some(Ok(id))) => {
                let Some(usuario) = app.state().usuarios.iter().find(|u| u.id == id).cloned() else {
                    println!("Usuario {} no está en la lista", id);
                    continue;
                };
                app.start_edit(&usuario);
                let nombre = prompt(&format!("Nombre [{}]:", usuario.nombre))?;
                let email = prompt(&format!("Email [{}]:", usuario.email))?;
                if !nombre.trim().is_empty() {
                    app.draft_mut().nombre = nombre;
                }
                if !email.trim().is_empty() {
                    app.draft_mut().email = email;
                }
                app.submit().await;
            }
            (Some("eliminar"), Some(Ok(id))) => {
                app.delete(id, confirm).await;
            }
            (None, _) => continue,
            _ => println!("Comando no reconocido"),
        }
        println!("{}", render(app.state()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    logger::init("warn");
    let args = Args::parse();

    let client = ApiClient::new(args.api_url.unwrap_or(config.api_url));
    let mut app = UsuariosApp::new(client);

    match args.command.unwrap_or(Command::Interactive) {
        Command::List => {
            app.load().await;
            if report(&app) {
                print!("{}", render(app.state()));
            }
        }
        Command::Show { id } => {
            let usuario = app.api().get(id).await?;
            println!("{}", serde_json::to_string_pretty(&usuario)?);
        }
        Command::Create { nombre, email } => {
            app.draft_mut().nombre = nombre;
            app.draft_mut().email = email;
            let saved = app.submit().await;
            if report(&app) && saved {
                print!("{}", render(app.state()));
            }
        }
        Command::Update { id, nombre, email } => {
            let usuario = app.api().get(id).await?;
            app.start_edit(&usuario);
            app.draft_mut().nombre = nombre;
            app.draft_mut().email = email;
            let saved = app.submit().await;
            if report(&app) && saved {
                print!("{}", render(app.state()));
            }
        }
        Command::Delete { id, yes } => {
            let deleted = app.delete(id, |question| yes || confirm(question)).await;
            if report(&app) && deleted {
                print!("{}", render(app.state()));
            }
        }
        Command::Info => {
            let info = app.api().info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Health => {
            let health = app.api().health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.is_ok() {
                std::process::exit(1);
            }
        }
        Command::Interactive => interactive(&mut app).await?,
    }

    Ok(())
}
