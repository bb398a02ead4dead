use std::path::Path;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use crate::application::{App, AppMode, Screen};
use crate::domain::{CartAction, Distance, FilterAction};
use crate::infrastructure::{OrderExporter, StorefrontApi};

/// Receipt timestamp, e.g. "26 January 2026, 10:00".
const RECEIPT_DATE_FORMAT: &str = "%d %B %Y, %H:%M";

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, api: &dyn StorefrontApi, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, api, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Login | AppMode::Register => Self::handle_form_mode(app, api, key, modifiers),
            AppMode::Review => Self::handle_review_mode(app, api, key),
            _ => Self::handle_text_input_mode(app, api, key),
        }
    }

    pub fn load_restaurants(app: &mut App, api: &dyn StorefrontApi) {
        let query = app.restaurant_query();
        let result = api.restaurants(app.token.as_deref(), &query);
        app.set_restaurants_result(result);
    }

    pub fn load_restaurant(app: &mut App, api: &dyn StorefrontApi, restaurant_id: &str) {
        let result = api.restaurant_detail(app.token.as_deref(), restaurant_id);
        app.set_detail_result(result);
        if app.reviews.reviews().is_empty() {
            Self::load_more_reviews(app, api);
        }
    }

    pub fn load_more_reviews(app: &mut App, api: &dyn StorefrontApi) {
        let Some(restaurant_id) = app.reviews.restaurant_id().map(str::to_string) else {
            return;
        };
        if !app.reviews.can_load_more() {
            app.status_message = Some("No more reviews".to_string());
            return;
        }
        let page = app.reviews.next_page();
        let result = api.restaurant_reviews(app.token.as_deref(), &restaurant_id, page, app.review_limit);
        app.set_reviews_result(page, result);
    }

    pub fn load_orders(app: &mut App, api: &dyn StorefrontApi) {
        let query = app.order_query();
        let result = api.orders(app.token.as_deref(), &query);
        app.set_orders_result(result);
    }

    pub fn load_profile(app: &mut App, api: &dyn StorefrontApi) {
        let result = api.profile(app.token.as_deref());
        app.set_profile_result(result);
    }

    /// Screens behind authentication redirect to the login form.
    fn open_protected(app: &mut App, api: &dyn StorefrontApi, screen: Screen) {
        if !app.is_logged_in() {
            app.start_login();
            app.status_message = Some("Please log in first".to_string());
            return;
        }
        app.go_to(screen);
        match screen {
            Screen::Orders => Self::load_orders(app, api),
            Screen::Profile => Self::load_profile(app, api),
            _ => {}
        }
    }

    fn handle_normal_mode(app: &mut App, api: &dyn StorefrontApi, key: KeyCode, modifiers: KeyModifiers) {
        if app.screen == Screen::Restaurants && app.filters.drawer_open && Self::handle_filter_drawer(app, api, key) {
            return;
        }

        match key {
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
                return;
            }
            KeyCode::Char('1') => {
                app.go_to(Screen::Restaurants);
                return;
            }
            KeyCode::Char('2') => {
                app.selected_line = 0;
                app.go_to(Screen::Cart);
                return;
            }
            KeyCode::Char('3') => {
                Self::open_protected(app, api, Screen::Orders);
                return;
            }
            KeyCode::Char('4') => {
                Self::open_protected(app, api, Screen::Profile);
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.move_selection(-1);
                return;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.move_selection(1);
                return;
            }
            KeyCode::PageUp => {
                app.move_selection(-10);
                return;
            }
            KeyCode::PageDown => {
                app.move_selection(10);
                return;
            }
            _ => {}
        }

        app.status_message = None;
        match app.screen {
            Screen::Restaurants => Self::handle_restaurants(app, api, key),
            Screen::Detail => Self::handle_detail(app, api, key),
            Screen::Cart => Self::handle_cart(app, key),
            Screen::Checkout => Self::handle_checkout(app, key),
            Screen::Receipt => {
                if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                    app.receipt = None;
                    app.go_to(Screen::Restaurants);
                }
            }
            Screen::Orders => Self::handle_orders(app, api, key, modifiers),
            Screen::Profile => Self::handle_profile(app, api, key),
            Screen::Login => {
                if matches!(key, KeyCode::Enter) {
                    app.start_login();
                }
            }
        }
    }

    /// Keys owned by the open filter drawer. Returns false to fall through.
    fn handle_filter_drawer(app: &mut App, api: &dyn StorefrontApi, key: KeyCode) -> bool {
        let action = match key {
            KeyCode::Esc | KeyCode::Char('f') => FilterAction::Close,
            KeyCode::Char('d') => FilterAction::SetDistance(Distance::cycle(app.filters.distance)),
            KeyCode::Char('s') => FilterAction::SetSortBy(app.filters.sort_by.next()),
            KeyCode::Char(c @ '0'..='5') => {
                let rating = c.to_digit(10).and_then(|d| u8::try_from(d).ok()).filter(|d| *d > 0);
                FilterAction::SetRating(rating)
            }
            KeyCode::Char('x') => FilterAction::Reset,
            KeyCode::Char('c') => {
                app.start_text_input(AppMode::Category);
                return true;
            }
            KeyCode::Char('m') => {
                app.start_text_input(AppMode::PriceMin);
                return true;
            }
            KeyCode::Char('M') => {
                app.start_text_input(AppMode::PriceMax);
                return true;
            }
            _ => return false,
        };

        let reload = !matches!(action, FilterAction::Close | FilterAction::SetSortBy(_));
        app.dispatch_filter(action);
        if reload {
            Self::load_restaurants(app, api);
        }
        true
    }

    fn handle_restaurants(app: &mut App, api: &dyn StorefrontApi, key: KeyCode) {
        match key {
            KeyCode::Char('f') => app.dispatch_filter(FilterAction::Toggle),
            KeyCode::Char('/') => app.start_text_input(AppMode::Search),
            KeyCode::Char('r') => Self::load_restaurants(app, api),
            KeyCode::Char('n') | KeyCode::Right => {
                if app.next_restaurant_page() {
                    Self::load_restaurants(app, api);
                }
            }
            KeyCode::Char('p') | KeyCode::Left => {
                if app.previous_restaurant_page() {
                    Self::load_restaurants(app, api);
                }
            }
            KeyCode::Char('l') => {
                if app.is_logged_in() {
                    app.logout();
                } else {
                    app.start_login();
                }
            }
            KeyCode::Enter => {
                if let Some(restaurant_id) = app.open_selected_restaurant() {
                    Self::load_restaurant(app, api, &restaurant_id);
                }
            }
            _ => {}
        }
    }

    fn handle_detail(app: &mut App, api: &dyn StorefrontApi, key: KeyCode) {
        match key {
            KeyCode::Esc => app.go_to(Screen::Restaurants),
            KeyCode::Enter | KeyCode::Char('+') | KeyCode::Char('a') => {
                app.add_selected_menu_to_cart();
            }
            KeyCode::Char('-') => {
                app.decrease_selected_menu();
            }
            KeyCode::Tab => app.cycle_menu_tab(),
            KeyCode::Char('v') => Self::load_more_reviews(app, api),
            KeyCode::Char('c') => {
                let restaurant_id = app.detail.as_ref().map(|detail| detail.id.clone());
                app.start_checkout(restaurant_id);
            }
            _ => {}
        }
    }

    fn handle_cart(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.go_to(Screen::Restaurants),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                app.increase_selected_line();
            }
            KeyCode::Char('-') => {
                app.decrease_selected_line();
            }
            KeyCode::Char('x') => {
                app.clear_selected_restaurant();
            }
            KeyCode::Char('X') => {
                app.dispatch_cart(CartAction::ClearAll);
            }
            KeyCode::Char('c') | KeyCode::Enter => {
                if let Some(restaurant_id) = app.selected_cart_line().map(|line| line.restaurant_id.clone()) {
                    app.start_checkout(Some(restaurant_id));
                }
            }
            KeyCode::Char('C') => {
                if !app.cart.is_empty() {
                    app.start_checkout(None);
                }
            }
            _ => {}
        }
    }

    fn handle_checkout(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.selected_line = 0;
                app.go_to(Screen::Cart);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                app.increase_selected_line();
            }
            KeyCode::Char('-') => {
                app.decrease_selected_line();
            }
            KeyCode::Char('p') | KeyCode::Tab => app.cycle_payment_method(),
            KeyCode::Enter => {
                let date_label = chrono::Local::now().format(RECEIPT_DATE_FORMAT).to_string();
                app.confirm_purchase(&date_label);
            }
            _ => {}
        }
    }

    fn handle_orders(app: &mut App, api: &dyn StorefrontApi, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => app.go_to(Screen::Restaurants),
            KeyCode::BackTab | KeyCode::Left => {
                app.previous_order_status();
                Self::load_orders(app, api);
            }
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
                app.previous_order_status();
                Self::load_orders(app, api);
            }
            KeyCode::Tab | KeyCode::Right => {
                app.next_order_status();
                Self::load_orders(app, api);
            }
            KeyCode::Char('/') => app.start_text_input(AppMode::OrderSearch),
            KeyCode::Char('r') => Self::load_orders(app, api),
            KeyCode::Char('w') => {
                if !app.start_review() {
                    app.status_message = Some("No order selected".to_string());
                }
            }
            KeyCode::Char('e') => app.start_orders_export(),
            _ => {}
        }
    }

    fn handle_profile(app: &mut App, api: &dyn StorefrontApi, key: KeyCode) {
        match key {
            KeyCode::Esc => app.go_to(Screen::Restaurants),
            KeyCode::Char('r') => Self::load_profile(app, api),
            KeyCode::Char('l') => app.logout(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    /// Cursor movement and editing shared by every mode that types text.
    fn handle_editing_key(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Backspace => app.delete_char_before(),
            KeyCode::Delete => app.delete_char_at(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_text_input_mode(app: &mut App, api: &dyn StorefrontApi, key: KeyCode) {
        match key {
            KeyCode::Enter => match app.mode {
                AppMode::ExportOrders => {
                    let filename = app.get_export_filename();
                    let result = OrderExporter::export_to_csv(&app.orders, Path::new(&filename));
                    app.set_export_result(&filename, result);
                }
                AppMode::OrderSearch => {
                    app.finish_text_input();
                    Self::load_orders(app, api);
                }
                _ => {
                    app.finish_text_input();
                    Self::load_restaurants(app, api);
                }
            },
            KeyCode::Esc => app.cancel_text_input(),
            _ => Self::handle_editing_key(app, key),
        }
    }

    fn handle_form_mode(app: &mut App, api: &dyn StorefrontApi, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('n') = key {
                app.toggle_register();
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                app.status_message = None;
                app.go_to(Screen::Restaurants);
            }
            KeyCode::Tab | KeyCode::Down => app.next_form_field(),
            KeyCode::Enter if app.mode == AppMode::Register => match app.register_payload() {
                Ok(payload) => {
                    debug!(email = %payload.email, "Registering");
                    let result = api.register(&payload);
                    app.set_register_result(result);
                }
                Err(error) => app.status_message = Some(error.to_string()),
            },
            KeyCode::Enter => match app.login_payload() {
                Ok(payload) => {
                    debug!(email = %payload.email, "Logging in");
                    let result = api.login(&payload);
                    app.set_login_result(result);
                }
                Err(error) => app.status_message = Some(error.to_string()),
            },
            _ => Self::handle_editing_key(app, key),
        }
    }

    fn handle_review_mode(app: &mut App, api: &dyn StorefrontApi, key: KeyCode) {
        match key {
            KeyCode::Esc => app.cancel_review(),
            KeyCode::Up => app.adjust_review_star(1),
            KeyCode::Down => app.adjust_review_star(-1),
            KeyCode::Enter => match app.review_payload() {
                Ok(payload) => {
                    let result = api.submit_review(app.token.as_deref(), &payload);
                    app.set_review_submit_result(result);
                }
                Err(error) => app.status_message = Some(error.to_string()),
            },
            _ => Self::handle_editing_key(app, key),
        }
    }
}
