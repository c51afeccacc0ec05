use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chatprefixes::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// A pretend game server: players join, chat, and run commands from stdin.
//
//   join <name> [op]            connect a player (op = privileged)
//   say <name> <message…>       chat as a player
//   run <name|console> <label> <args…>
//   reload                      re-read the prefix store
//   quit
// ---------------------------------------------------------------------------

struct Connected {
    player: OnlinePlayer,
    operator: bool,
    outbox: mpsc::UnboundedSender<Component>,
}

#[derive(Clone, Default)]
struct Server {
    players: Arc<RwLock<HashMap<String, Connected>>>,
}

impl PlayerDirectory for Server {
    fn resolve(&self, name: &str) -> Option<OnlinePlayer> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|c| c.player.clone())
    }
}

impl Server {
    fn join(&self, name: &str, operator: bool) {
        let (outbox, mut inbox) = mpsc::unbounded_channel::<Component>();
        let player = OnlinePlayer::new(PlayerId::new_v4(), name);

        let label = name.to_string();
        tokio::spawn(async move {
            while let Some(msg) = inbox.recv().await {
                println!("  [{label} sees] {}", msg.plain_text());
            }
        });

        tracing::info!(name, player_id = %player.id, operator, "player joined");
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Connected { player, operator, outbox });
    }

    fn invoker(&self, name: &str) -> Option<Invoker> {
        if name == "console" {
            return Some(Invoker::Console);
        }
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        players
            .get(name)
            .map(|c| Invoker::player(c.player.clone(), c.operator))
    }

    fn chat_event(&self, name: &str, message: &str) -> Option<ChatEvent> {
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        let sender = players.get(name)?;
        let viewers: Vec<Arc<dyn Audience>> = players
            .values()
            .map(|c| Arc::new(c.outbox.clone()) as Arc<dyn Audience>)
            .collect();
        Some(ChatEvent::new(sender.player.id, name, message, viewers))
    }
}

#[tokio::main]
async fn main() -> Result<(), ChatPrefixesError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
                ChatPrefixesError::InvalidConfig(format!("cannot read {path}: {e}"))
            })?;
            ChatPrefixesConfig::from_yaml_str(&text)?
        }
        None => ChatPrefixesConfig::default(),
    };

    let server = Server::default();
    let (handle, task) = ChatPrefixesBuilder::new()
        .config(config)
        .build(server.clone())?
        .start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["join", name] => server.join(name, false),
            ["join", name, "op"] => server.join(name, true),
            ["say", name, rest @ ..] => match server.chat_event(name, &rest.join(" ")) {
                Some(event) => handle.chat(event).await?,
                None => println!("{name} is not online"),
            },
            ["run", name, label, args @ ..] => {
                let Some(invoker) = server.invoker(name) else {
                    println!("{name} is not online");
                    continue;
                };
                let reply = match handle.command(invoker, label, args).await? {
                    Ok(confirmation) => confirmation,
                    Err(e) => e.to_component(),
                };
                println!("  [{name} reply] {}", reply.plain_text());
            }
            ["reload"] => {
                let report = handle.reload().await?;
                println!("  reloaded: {report:?}");
            }
            ["quit"] => break,
            [] => {}
            _ => println!("unrecognised input"),
        }
    }

    handle.shutdown().await?;
    task.await.map_err(|_| ChatPrefixesError::Unavailable)?
}
