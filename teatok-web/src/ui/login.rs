use teatok_client::{
    api::{Credentials, NewUser, User},
    Error, HttpApi, Identity,
};
use yew::prelude::*;

use crate::LoginInfo;

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    pub host: Option<String>,
    pub on_submit: Callback<LoginInfo>,
}

pub struct Login {
    host: String,
    name: String,
    email: String,
    pass: String,
    registering: bool,
    pending: bool,
    error: Option<String>,
}

pub enum LoginMsg {
    HostChanged(String),
    NameChanged(String),
    EmailChanged(String),
    PassChanged(String),
    ToggleRegister,
    SubmitClicked,
    AnonymousClicked,
    Answered(Result<User, Error>),
}

impl Login {
    fn send(&mut self, ctx: &Context<Self>, anonymous: bool) {
        if self.pending {
            return;
        }
        self.pending = true;
        self.error = None;
        let api = HttpApi::new(self.host.clone());
        let creds = Credentials {
            email: self.email.clone(),
            password: self.pass.clone(),
        };
        let new_user = self.registering.then(|| NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.pass.clone(),
        });
        ctx.link().send_future(async move {
            let res = match (anonymous, new_user) {
                (true, _) => api.anonymous().await,
                (false, Some(u)) => api.register(&u).await,
                (false, None) => api.login(&creds).await,
            };
            LoginMsg::Answered(res)
        });
    }
}

impl Component for Login {
    type Message = LoginMsg;
    type Properties = LoginProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            host: ctx.props().host.clone().unwrap_or_default(),
            name: String::new(),
            email: String::new(),
            pass: String::new(),
            registering: false,
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoginMsg::HostChanged(h) => self.host = h,
            LoginMsg::NameChanged(n) => self.name = n,
            LoginMsg::EmailChanged(e) => self.email = e,
            LoginMsg::PassChanged(p) => self.pass = p,
            LoginMsg::ToggleRegister => self.registering = !self.registering,
            LoginMsg::SubmitClicked => self.send(ctx, false),
            LoginMsg::AnonymousClicked => self.send(ctx, true),
            LoginMsg::Answered(Ok(user)) => {
                self.pending = false;
                tracing::info!(user = ?user.id, "logged in");
                ctx.props().on_submit.emit(LoginInfo {
                    host: self.host.clone(),
                    identity: Identity::from(user),
                });
            }
            LoginMsg::Answered(Err(err)) => {
                self.pending = false;
                tracing::warn!(?err, "login failed");
                self.error = Some(
                    err.server_message()
                        .unwrap_or_else(|| String::from("Failed to sign in")),
                );
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link().callback(|e: web_sys::Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    LoginMsg::$msg(input.value())
                })
            };
        }
        let name_input = self.registering.then(|| {
            html! {
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="name">{ "Name" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="name"
                        placeholder="name"
                        value={self.name.clone()}
                        onchange={callback_for!(NameChanged)}
                    />
                </div>
            }
        });
        html! {<>
            <div class="text-center my-4">
                <h1>{ if self.registering { "Sign up" } else { "Sign in" } }</h1>
            </div>
            <form class="login-form" onsubmit={ctx.link().callback(|e: SubmitEvent| {
                e.prevent_default();
                LoginMsg::SubmitClicked
            })}>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="host">{ "Host" }</label>
                    <input
                        type="url"
                        class="form-control form-control-lg"
                        id="host"
                        placeholder="https://example.org"
                        value={self.host.clone()}
                        onchange={callback_for!(HostChanged)}
                    />
                </div>
                { for name_input }
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="email">{ "Email" }</label>
                    <input
                        type="email"
                        class="form-control form-control-lg"
                        id="email"
                        placeholder="you@example.org"
                        value={self.email.clone()}
                        onchange={callback_for!(EmailChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="pass">{ "Password" }</label>
                    <input
                        type="password"
                        class="form-control form-control-lg"
                        id="pass"
                        placeholder="pass"
                        value={self.pass.clone()}
                        onchange={callback_for!(PassChanged)}
                    />
                </div>
                { for self.error.as_ref().map(|e| html! {
                    <div class="alert alert-danger">{ e }</div>
                }) }
                <button type="submit" class="btn btn-primary" disabled={self.pending}>
                    { if self.registering { "Create account" } else { "Connect" } }
                </button>
                <button
                    type="button"
                    class="btn btn-secondary ms-2"
                    disabled={self.pending}
                    onclick={ctx.link().callback(|_| LoginMsg::AnonymousClicked)}
                >
                    { "Continue anonymously" }
                </button>
                <button
                    type="button"
                    class="btn btn-link"
                    onclick={ctx.link().callback(|_| LoginMsg::ToggleRegister)}
                >
                    { if self.registering { "I already have an account" } else { "Create an account" } }
                </button>
            </form>
        </>}
    }
}
