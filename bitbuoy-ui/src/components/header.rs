//! Page header: logo, sign-in form and user menu.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DashboardHeaderProps {
    /// Signed-in operator; `None` shows the sign-in form
    pub username: Option<String>,
    pub open: bool,
    pub on_toggle_menu: EventHandler<()>,
    /// Called with (username, password)
    pub on_sign_in: EventHandler<(String, String)>,
    pub on_sign_out: EventHandler<()>,
}

fn initials(username: &str) -> String {
    username
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[component]
pub fn DashboardHeader(props: DashboardHeaderProps) -> Element {
    let on_toggle_menu = props.on_toggle_menu;
    let on_sign_in = props.on_sign_in;
    let on_sign_out = props.on_sign_out;

    rsx! {
        header {
            style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 16px; border-bottom: 1px solid #e0e0e0;",
            div {
                style: "font-size: 22px; font-weight: 700; color: #1565C0; letter-spacing: 0.5px;",
                "BitBuoy"
            }
            match props.username {
                Some(username) => rsx! {
                    div {
                        style: "position: relative;",
                        button {
                            style: "width: 32px; height: 32px; border-radius: 50%; border: none; background: #E3F2FD; font-weight: 600; cursor: pointer;",
                            onclick: move |_| on_toggle_menu.call(()),
                            "{initials(&username)}"
                        }
                        if props.open {
                            div {
                                style: "position: absolute; right: 0; top: 40px; width: 200px; background: white; border: 1px solid #ddd; border-radius: 6px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); z-index: 1000;",
                                div {
                                    style: "padding: 10px 12px; border-bottom: 1px solid #eee;",
                                    p { style: "margin: 0; font-size: 14px; font-weight: 500;", "{username}" }
                                }
                                button {
                                    style: "width: 100%; padding: 10px 12px; text-align: left; border: none; background: none; cursor: pointer;",
                                    onclick: move |_| on_sign_out.call(()),
                                    "Log out"
                                }
                            }
                        }
                    }
                },
                None => rsx! {
                    SignInForm { on_sign_in }
                },
            }
        }
    }
}

/// Username/password form. The password is held only until submitted.
#[component]
fn SignInForm(on_sign_in: EventHandler<(String, String)>) -> Element {
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);

    let onsubmit = move |evt: Event<FormData>| {
        evt.prevent_default();
        let name = username.read().trim().to_string();
        if name.is_empty() || password.read().is_empty() {
            return;
        }
        let secret = std::mem::take(&mut *password.write());
        on_sign_in.call((name, secret));
    };

    rsx! {
        form {
            style: "display: flex; gap: 8px; align-items: center;",
            onsubmit,
            input {
                r#type: "text",
                placeholder: "Username",
                autocomplete: "username",
                value: "{username}",
                oninput: move |evt| username.set(evt.value()),
            }
            input {
                r#type: "password",
                placeholder: "Password",
                autocomplete: "current-password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            button {
                r#type: "submit",
                style: "padding: 6px 14px; border: none; border-radius: 6px; background: #1565C0; color: white; cursor: pointer;",
                "Sign in"
            }
        }
    }
}
