use crate::display::{DisplaySession, HEALTH_PATH};
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const TITLE: &str = "Blue-Green Deployment Demo";

pub const TECH_STACK: [&str; 5] = ["Rust", "axum", "Docker", "Nginx", "GitHub Actions"];

pub const FEATURES: [&str; 6] = [
    "🐳 Docker containerization",
    "🔄 Blue-Green deployment strategy",
    "📋 Nginx load balancing",
    "🛠️ Shell scripts automation",
    "🚀 GitHub Actions CI/CD pipeline",
    "❤️ Health checks and monitoring",
];

pub const DEPLOY_COMMANDS: [&str; 2] = [
    "./scripts/deploy.sh v1.0.0 green",
    "./scripts/switch.sh green",
];

const STYLE: &str = r"
body { margin: 0; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; }
.app-header { min-height: 100vh; display: flex; flex-direction: column; align-items: center;
  justify-content: center; color: #fff; text-align: center; padding: 24px; box-sizing: border-box; }
.env-badge { background: rgba(255,255,255,0.2); padding: 10px 20px; border-radius: 25px; margin: 20px 0; }
.subtitle { opacity: 0.9; font-style: italic; }
.tech-stack span { display: inline-block; margin: 4px; padding: 4px 12px; border-radius: 12px;
  background: rgba(255,255,255,0.15); }
.features { text-align: left; max-width: 600px; }
.demo-buttons { display: flex; gap: 12px; justify-content: center; flex-wrap: wrap; }
.demo-btn { border: 2px solid #fff; background: rgba(255,255,255,0.2); color: #fff; padding: 10px 20px;
  border-radius: 6px; cursor: pointer; font-size: 1rem; }
.demo-btn.secondary { background: transparent; }
.command-box { background: rgba(0,0,0,0.3); padding: 12px 20px; border-radius: 6px; text-align: left; }
footer { margin-top: 40px; opacity: 0.8; }
";

// Keeps the uptime line moving between page loads, starting from the server's count.
const UPTIME_SCRIPT: &str = r"
(function () {
  var el = document.getElementById('uptime');
  if (!el) { return; }
  var seconds = parseInt(el.getAttribute('data-uptime'), 10) || 0;
  setInterval(function () {
    seconds += 1;
    el.textContent = Math.floor(seconds / 60) + 'm ' + (seconds % 60) + 's';
  }, 1000);
})();
";

/// Render the full banner page for `session`.
#[must_use]
pub fn page(session: &DisplaySession) -> Markup {
    let config = session.display_config();
    let label = session.environment().label();
    let uptime_seconds = session.uptime_seconds();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (config.icon) " " (label) " | " (TITLE) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header.app-header style={ "background: " (config.gradient) "; background-color: " (config.color) ";" } {
                    div.environment-banner {
                        h1 { "🚀 " (TITLE) }
                        div.environment-info {
                            div.env-badge {
                                h2 { (config.icon) " Environment: " span #environment { (label) } }
                                p.subtitle { (config.subtitle) }
                                p { "Version: " span #version { (session.version()) } }
                                p { "Deployed at: " span #deployed-at { (session.deployed_at()) } }
                                p {
                                    "Uptime: "
                                    span #uptime data-uptime=(uptime_seconds) { (session.uptime()) }
                                }
                            }
                        }
                    }
                    div.tech-stack {
                        @for tech in TECH_STACK {
                            span { (tech) }
                        }
                    }
                    div.content-section {
                        h3 { "✅ Features Demonstrated:" }
                        ul.features {
                            @for feature in FEATURES {
                                li { (feature) }
                            }
                        }
                        div.demo-buttons {
                            button.demo-btn type="button" onclick=(alert_script(&session.announcement())) {
                                "Check Current Environment"
                            }
                            button.demo-btn.secondary type="button" onclick=(open_script(HEALTH_PATH)) {
                                "Health Check"
                            }
                            form method="post" action="/refresh" {
                                button.demo-btn.secondary type="submit" { "🔄 Refresh" }
                            }
                        }
                    }
                    div.deployment-info {
                        h4 { "🔧 Deployment Commands:" }
                        div.command-box {
                            @for command in DEPLOY_COMMANDS {
                                code { (command) }
                                br;
                            }
                        }
                    }
                    footer {
                        p { "Blue-Green Deployment Implementation" }
                        p { "Built with " (TECH_STACK.join(" + ")) }
                    }
                }
                script { (PreEscaped(UPTIME_SCRIPT)) }
            }
        }
    }
}

// JSON string literals are valid JavaScript string literals; maud escapes the
// attribute value for HTML on top of that.
fn alert_script(message: &str) -> String {
    format!("alert({})", js_string(message))
}

fn open_script(path: &str) -> String {
    format!("window.open({}, '_blank')", js_string(path))
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
