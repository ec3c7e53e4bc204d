//! Resource subcommands: each maps onto one façade call.

use layer_api::{Body, Client, ListConversationsOptions, Response, Result, text_body};
use serde_json::{Map, Value, json};

use super::{AnnounceArgs, BadgeCmd, BlockCmd, ConversationCmd, IdentityCmd, MessageCmd};

pub async fn conversation(client: &Client, cmd: ConversationCmd) -> Result<Response> {
    let c = client.conversations();
    match cmd {
        ConversationCmd::Get { id, user: Some(user) } => c.get_from_user(&user, &id).await,
        ConversationCmd::Get { id, user: None } => c.get(&id).await,
        ConversationCmd::Create {
            participants,
            distinct,
            dedupe,
        } => {
            let body = json!({ "participants": participants, "distinct": distinct });
            match dedupe {
                Some(key) => c.create_dedupe(&key, body).await,
                None => c.create(body).await,
            }
        }
        ConversationCmd::List {
            user,
            page_size,
            from_id,
            sort_by,
        } => {
            let opts = ListConversationsOptions {
                page_size,
                from_id,
                sort_by,
            };
            c.get_all_from_user(&user, &opts).await
        }
        ConversationCmd::Add { id, users } => c.add_participants(&id, &refs(&users)).await,
        ConversationCmd::Remove { id, users } => c.remove_participants(&id, &refs(&users)).await,
        ConversationCmd::Delete { id } => c.delete(&id).await,
    }
}

pub async fn message(client: &Client, cmd: MessageCmd) -> Result<Response> {
    let m = client.messages();
    match cmd {
        MessageCmd::Send {
            conversation,
            text,
            user: Some(user),
            ..
        } => m.send_text_from_user(&conversation, &user, &text).await,
        MessageCmd::Send {
            conversation,
            text,
            name,
            ..
        } => {
            let name = name.unwrap_or_default();
            m.send_text_from_name(&conversation, &name, &text).await
        }
    }
}

pub async fn announce(client: &Client, args: AnnounceArgs) -> Result<Response> {
    let mut body = text_body("name", &args.name, &args.text);
    if let Value::Object(map) = &mut body {
        map.insert("recipients".into(), json!(args.recipients));
    }
    let a = client.announcements();
    match args.dedupe {
        Some(key) => a.send_dedupe(&key, body).await,
        None => a.send(body).await,
    }
}

pub async fn block(client: &Client, cmd: BlockCmd) -> Result<Response> {
    let b = client.blocklist();
    match cmd {
        BlockCmd::List { owner } => b.get(&owner).await,
        BlockCmd::Add { owner, user } => b.block(&owner, &user).await,
        BlockCmd::Remove { owner, user } => b.unblock(&owner, &user).await,
    }
}

pub async fn identity(client: &Client, cmd: IdentityCmd) -> Result<Response> {
    let i = client.identities();
    match cmd {
        IdentityCmd::Get { user } => i.get(&user).await,
        IdentityCmd::Create { user, display_name } => {
            let mut props = Map::new();
            props.insert("display_name".into(), Value::String(display_name));
            i.create(&user, props).await
        }
        IdentityCmd::Delete { user } => i.delete(&user).await,
    }
}

pub async fn badge(client: &Client, cmd: BadgeCmd) -> Result<Response> {
    match cmd {
        BadgeCmd::Get { user } => client.badges().get(&user).await,
    }
}

/// Render a response body for stdout.
pub fn render(res: Response) -> String {
    match res.body {
        Body::Empty => format!("HTTP {}", res.status),
        Body::Text(s) => s,
        Body::Json(v) => serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string()),
    }
}

fn refs(v: &[String]) -> Vec<&str> {
    v.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_prefers_json_then_text() {
        let res = Response {
            status: 200,
            body: Body::Json(json!({"id": "abc"})),
        };
        assert_eq!(render(res), "{\n  \"id\": \"abc\"\n}");
        let res = Response {
            status: 200,
            body: Body::Text("OK".into()),
        };
        assert_eq!(render(res), "OK");
        let res = Response {
            status: 204,
            body: Body::Empty,
        };
        assert_eq!(render(res), "HTTP 204");
    }
}
