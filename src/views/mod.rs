/**
 * HTML Page Rendering
 *
 * The render(view, locals) collaborator: one function per page, each
 * producing a complete HTML document. User-provided content (usernames,
 * secrets) is escaped before interpolation; everything else is static
 * markup.
 */

use crate::users::User;

/// GET `/` - landing page.
pub fn home_page() -> String {
    layout(
        "Secrets",
        r#"<h1>Secrets</h1>
<p>Don't keep your secrets, share them anonymously!</p>
<p>
  <a class="btn" href="/register">Register</a>
  <a class="btn" href="/login">Login</a>
  <a class="btn" href="/secrets">Secrets</a>
</p>"#,
    )
}

/// GET `/register` - registration form.
pub fn register_page() -> String {
    layout(
        "Register",
        r#"<h1>Register</h1>
<form action="/register" method="POST">
  <label for="username">Username</label>
  <input type="text" id="username" name="username" required>
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required>
  <button type="submit">Register</button>
</form>
<a class="btn" href="/auth/google">Sign up with Google</a>"#,
    )
}

/// GET `/login` - login form.
pub fn login_page() -> String {
    layout(
        "Login",
        r#"<h1>Login</h1>
<form action="/login" method="POST">
  <label for="username">Username</label>
  <input type="text" id="username" name="username" required>
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required>
  <button type="submit">Login</button>
</form>
<a class="btn" href="/auth/google">Sign in with Google</a>"#,
    )
}

/// GET `/submit` - secret submission form.
pub fn submit_page() -> String {
    layout(
        "Submit",
        r#"<h1>Share a secret</h1>
<form action="/submit" method="POST">
  <label for="secret">Your secret</label>
  <input type="text" id="secret" name="secret">
  <button type="submit">Submit</button>
</form>"#,
    )
}

/// GET `/secrets` - everyone's secrets.
///
/// The same list renders for anonymous and authenticated visitors; only
/// the action link differs. Accounts without a username (OAuth-only) are
/// labelled "Anonymous".
pub fn secrets_page(holders: &[User], authenticated: bool) -> String {
    let mut body = String::from("<h1>You shall not tell</h1>\n<ul class=\"secrets\">\n");

    for holder in holders {
        let label = holder.username.as_deref().unwrap_or("Anonymous");
        let secret = holder.secret.as_deref().unwrap_or("");
        body.push_str(&format!(
            "  <li><span class=\"who\">{}</span>: <span class=\"secret\">{}</span></li>\n",
            escape(label),
            escape(secret)
        ));
    }
    body.push_str("</ul>\n");

    let (href, label) = if authenticated {
        ("/logout", "Log Out")
    } else {
        ("/login", "Log In")
    };
    body.push_str(&format!(
        "<p>\n  <a class=\"btn\" href=\"{href}\">{label}</a>\n  <a class=\"btn\" href=\"/submit\">Submit a Secret</a>\n</p>"
    ));

    layout("Secrets", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{}</title>
  <link rel="stylesheet" href="/static/css/styles.css">
</head>
<body>
<main>
{}
</main>
</body>
</html>
"#,
        escape(title),
        body
    )
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn holder(username: Option<&str>, secret: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: username.map(str::to_string),
            password_hash: None,
            google_id: None,
            secret: secret.map(str::to_string),
            active: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_secrets_page_lists_each_holder_once() {
        let holders = vec![
            holder(Some("alice"), Some("i sing in the shower")),
            holder(Some("bob"), Some("i never floss")),
        ];
        let page = secrets_page(&holders, false);

        assert_eq!(page.matches("i sing in the shower").count(), 1);
        assert_eq!(page.matches("i never floss").count(), 1);
    }

    #[test]
    fn test_oauth_only_holder_is_anonymous() {
        let holders = vec![holder(None, Some("no username here"))];
        let page = secrets_page(&holders, false);
        assert!(page.contains("Anonymous"));
    }

    #[test]
    fn test_action_link_is_the_only_difference() {
        let holders = vec![holder(Some("alice"), Some("same secret"))];
        let anonymous = secrets_page(&holders, false);
        let logged_in = secrets_page(&holders, true);

        assert!(anonymous.contains(r#"href="/login">Log In"#));
        assert!(logged_in.contains(r#"href="/logout">Log Out"#));

        // The listed data is identical either way.
        let strip = |page: &str| {
            page.replace(r#"<a class="btn" href="/login">Log In</a>"#, "")
                .replace(r#"<a class="btn" href="/logout">Log Out</a>"#, "")
        };
        assert_eq!(strip(&anonymous), strip(&logged_in));
    }

    #[test]
    fn test_empty_secret_still_renders() {
        let holders = vec![holder(Some("quiet"), Some(""))];
        let page = secrets_page(&holders, false);
        assert!(page.contains("quiet"));
    }

    #[test]
    fn test_forms_post_to_their_routes() {
        assert!(register_page().contains(r#"action="/register" method="POST""#));
        assert!(login_page().contains(r#"action="/login" method="POST""#));
        assert!(submit_page().contains(r#"action="/submit" method="POST""#));
    }
}
