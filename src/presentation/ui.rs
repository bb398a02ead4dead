use crate::application::{App, AppMode, Screen};
use crate::domain::{format_rupiah, group_by_restaurant, CartTotals, OrderStatus, PaymentMethod, SortBy};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

const SELECTED: Style = Style::new().bg(Color::Blue).fg(Color::White);

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Restaurants => render_restaurants(f, app, chunks[1]),
        Screen::Detail => render_detail(f, app, chunks[1]),
        Screen::Cart => render_cart(f, app, chunks[1]),
        Screen::Checkout => render_checkout(f, app, chunks[1]),
        Screen::Receipt => render_receipt(f, app, chunks[1]),
        Screen::Orders => render_orders(f, app, chunks[1]),
        Screen::Profile => render_profile(f, app, chunks[1]),
        Screen::Login => render_login(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Review => render_review_popup(f, app),
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let totals = CartTotals::of(app.cart.lines());
    let who = app.user.as_ref().map(|u| u.name.as_str()).unwrap_or("guest");
    let header = Paragraph::new(format!(
        "tsfood | {} | Cart: {} item(s) {} | {}",
        screen_title(app.screen),
        totals.item_count,
        format_rupiah(totals.price_total),
        who
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Restaurants => "Restaurants",
        Screen::Detail => "Restaurant",
        Screen::Cart => "My Cart",
        Screen::Checkout => "Checkout",
        Screen::Receipt => "Payment Success",
        Screen::Orders => "My Orders",
        Screen::Profile => "Profile",
        Screen::Login => "Login",
    }
}

/// First row to draw so that `selected` stays inside `height` rows.
fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 { 0 } else { selected.saturating_sub(height - 1) }
}

fn row_style(selected: bool) -> Style {
    if selected { SELECTED } else { Style::default() }
}

fn render_restaurants(f: &mut Frame, app: &App, area: Rect) {
    let area = if app.filters.drawer_open {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);
        render_filter_drawer(f, app, chunks[1]);
        chunks[0]
    } else {
        area
    };

    let visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.selected_restaurant, visible_rows);
    let header = Row::new(["Name", "★", "Place", "Distance", "Price", "Category"])
        .style(Style::default().fg(Color::Yellow));
    let rows: Vec<Row> = app
        .restaurants
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, r)| {
            Row::new([
                Cell::from(r.name.clone()),
                Cell::from(format!("{:.1}", r.star)),
                Cell::from(r.place.clone()),
                Cell::from(format!("{:.1} km", r.distance)),
                Cell::from(format!("{} - {}", format_rupiah(r.price_range.min), format_rupiah(r.price_range.max))),
                Cell::from(r.category.clone()),
            ])
            .style(row_style(i == app.selected_restaurant))
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(22),
        Constraint::Length(12),
    ];
    let title = format!(
        "Restaurants (page {}/{}, sorted by {})",
        app.restaurant_page,
        app.total_restaurant_pages(),
        app.filters.sort_by.label()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_filter_drawer(f: &mut Frame, app: &App, area: Rect) {
    let filters = &app.filters;
    let or_any = |value: &str| if value.trim().is_empty() { "any".to_string() } else { value.to_string() };
    let sort_options: Vec<&str> = SortBy::ALL.iter().map(|s| s.label()).collect();
    let lines = vec![
        Line::from(format!("[d] Distance: {}", filters.distance.map(|d| d.as_str()).unwrap_or("any"))),
        Line::from(format!("[m] Min price: {}", or_any(filters.price_min.as_str()))),
        Line::from(format!("[M] Max price: {}", or_any(filters.price_max.as_str()))),
        Line::from(format!(
            "[0-5] Rating: {}",
            filters.rating.map(|r| format!("{}+", r)).unwrap_or_else(|| "any".to_string())
        )),
        Line::from(format!("[c] Category: {}", filters.category)),
        Line::from(format!("[s] Sort: {}", filters.sort_by.label())),
        Line::from(Span::styled(format!("    ({})", sort_options.join(" / ")), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from("[x] Reset  [f/Esc] Close"),
    ];
    let drawer = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Filter"))
        .wrap(Wrap { trim: false });
    f.render_widget(drawer, area);
}

fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = app.detail.as_ref() else {
        f.render_widget(
            Paragraph::new("Loading restaurant...").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    let info = Paragraph::new(format!(
        "★ {:.1} | {} · {:.1} km | {}",
        detail.star, detail.place, detail.distance, detail.category
    ))
    .block(Block::default().borders(Borders::ALL).title(detail.name.clone()));
    f.render_widget(info, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let menus = app.visible_menus();
    let visible_rows = body[0].height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.selected_menu, visible_rows);
    let rows: Vec<Row> = menus
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, menu)| {
            let quantity = app.quantity_in_cart(menu);
            Row::new([
                Cell::from(menu.food_name.clone()),
                Cell::from(format_rupiah(menu.price)),
                Cell::from(if quantity > 0 { format!("× {}", quantity) } else { String::new() }),
            ])
            .style(row_style(i == app.selected_menu))
        })
        .collect();
    let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(12), Constraint::Length(6)])
        .block(Block::default().borders(Borders::ALL).title(format!("Menu: {} [Tab]", app.menu_tab.label())))
        .column_spacing(1);
    f.render_widget(table, body[0]);

    let mut review_lines = vec![Line::from(Span::styled(
        format!("★ {:.1} from {} review(s)", app.reviews.average_star(), app.reviews.reviews().len()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for review in app.reviews.reviews() {
        review_lines.push(Line::from(""));
        review_lines.push(Line::from(format!("{} · {}", review.user.name, "★".repeat(review.star as usize))));
        review_lines.push(Line::from(review.comment.clone()));
    }
    if app.reviews.can_load_more() {
        review_lines.push(Line::from(""));
        review_lines.push(Line::from(Span::styled("[v] Show more", Style::default().fg(Color::DarkGray))));
    }
    let reviews = Paragraph::new(review_lines)
        .block(Block::default().borders(Borders::ALL).title(review_title(app)))
        .wrap(Wrap { trim: true });
    f.render_widget(reviews, body[1]);
}

fn review_title(app: &App) -> String {
    match app.reviews.page() {
        0 => "Reviews".to_string(),
        page => format!("Reviews (page {} of {})", page, app.reviews.total_pages().max(page)),
    }
}

fn render_cart(f: &mut Frame, app: &App, area: Rect) {
    if app.cart.is_empty() {
        let empty = Paragraph::new("Your cart is empty. Pick something from a restaurant menu.")
            .block(Block::default().borders(Borders::ALL).title("My Cart"));
        f.render_widget(empty, area);
        return;
    }

    let mut rows = Vec::new();
    let mut index = 0;
    for group in group_by_restaurant(app.cart.lines()) {
        rows.push(
            Row::new([
                Cell::from(group.restaurant_name.to_string()),
                Cell::from(""),
                Cell::from(format_rupiah(group.subtotal)),
            ])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        );
        for line in group.lines {
            rows.push(
                Row::new([
                    Cell::from(format!("  {}", line.name)),
                    Cell::from(format!("× {}", line.quantity)),
                    Cell::from(format_rupiah(line.subtotal())),
                ])
                .style(row_style(index == app.selected_line)),
            );
            index += 1;
        }
    }

    let totals = CartTotals::of(app.cart.lines());
    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(6), Constraint::Length(14)])
        .block(Block::default().borders(Borders::ALL).title(format!(
            "My Cart ({} item(s), {})",
            totals.item_count,
            format_rupiah(totals.price_total)
        )))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_checkout(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let summary = app.checkout_summary();
    let rows: Vec<Row> = app
        .visible_cart_lines()
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            Row::new([
                Cell::from(line.name.clone()),
                Cell::from(format!("× {}", line.quantity)),
                Cell::from(format_rupiah(line.subtotal())),
            ])
            .style(row_style(i == app.selected_line))
        })
        .collect();
    let items = Table::new(rows, [Constraint::Min(16), Constraint::Length(6), Constraint::Length(14)])
        .block(Block::default().borders(Borders::ALL).title(summary.restaurant_name.clone()))
        .column_spacing(1);
    f.render_widget(items, chunks[0]);

    let mut lines = vec![Line::from(Span::styled("Payment Method [p]", Style::default().add_modifier(Modifier::BOLD)))];
    for method in PaymentMethod::ALL {
        let marker = if method == app.payment_method { "(•)" } else { "( )" };
        lines.push(Line::from(format!("{} {}", marker, method.label())));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled("Payment Summary", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!(
            "Price ({} items)  {}",
            summary.totals.item_count,
            format_rupiah(summary.totals.price_total)
        )),
        Line::from(format!("Delivery Fee  {}", format_rupiah(summary.delivery_fee))),
        Line::from(format!("Service Fee  {}", format_rupiah(summary.service_fee))),
        Line::from(Span::styled(
            format!("Total  {}", format_rupiah(summary.grand_total)),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[Enter] Buy"),
    ]);
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Checkout"));
    f.render_widget(panel, chunks[1]);
}

fn render_receipt(f: &mut Frame, app: &App, area: Rect) {
    let Some(receipt) = app.receipt.as_ref() else {
        f.render_widget(Paragraph::new("").block(Block::default().borders(Borders::ALL)), area);
        return;
    };
    let lines = vec![
        Line::from(Span::styled(
            "Payment Success",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from("Your payment has been successfully processed."),
        Line::from(""),
        Line::from(format!("Date  {}", receipt.date_label)),
        Line::from(format!("Restaurant  {}", receipt.restaurant_name)),
        Line::from(format!("Payment Method  {}", receipt.payment_method.label())),
        Line::from(format!("Price ({} items)  {}", receipt.items_count, format_rupiah(receipt.price))),
        Line::from(format!("Delivery Fee  {}", format_rupiah(receipt.delivery_fee))),
        Line::from(format!("Service Fee  {}", format_rupiah(receipt.service_fee))),
        Line::from(Span::styled(
            format!("Total  {}", format_rupiah(receipt.total)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[Enter] Back to home   [3] See my orders"),
    ];
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Receipt"));
    f.render_widget(panel, area);
}

fn render_orders(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let mut tabs = Vec::new();
    for status in OrderStatus::ALL {
        let style = if status == app.order_status {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        tabs.push(Span::styled(format!(" {} ", status.label()), style));
        tabs.push(Span::raw(" "));
    }
    if !app.order_search.is_empty() {
        tabs.push(Span::raw(format!("search: {}", app.order_search)));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    let visible_rows = chunks[1].height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.selected_order, visible_rows);
    let rows: Vec<Row> = app
        .orders
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, order)| {
            let items = order
                .items
                .iter()
                .map(|item| format!("{} × {}", item.name, item.qty))
                .collect::<Vec<_>>()
                .join(", ");
            Row::new([
                Cell::from(order.restaurant_name.clone()),
                Cell::from(items),
                Cell::from(format_rupiah(order.total())),
                Cell::from(order.status.label()),
            ])
            .style(row_style(i == app.selected_order))
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Length(20), Constraint::Min(20), Constraint::Length(14), Constraint::Length(11)],
    )
    .header(Row::new(["Restaurant", "Items", "Total", "Status"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().borders(Borders::ALL).title(format!("My Orders ({})", app.orders.len())))
    .column_spacing(1);
    f.render_widget(table, chunks[1]);
}

fn render_profile(f: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.profile, &app.user) {
        (Some(profile), _) => vec![
            Line::from(format!("Name  {}", profile.name)),
            Line::from(format!("Email  {}", profile.email.as_deref().unwrap_or("-"))),
            Line::from(format!("Phone  {}", profile.phone.as_deref().unwrap_or("-"))),
        ],
        (None, Some(user)) => vec![
            Line::from(format!("Name  {}", user.name)),
            Line::from(format!("Email  {}", user.email)),
            Line::from(format!("Phone  {}", user.phone.as_deref().unwrap_or("-"))),
        ],
        (None, None) => vec![Line::from("Not logged in")],
    };
    let mut lines = text;
    lines.push(Line::from(""));
    lines.push(Line::from("[r] Refresh  [l] Logout"));
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Profile"));
    f.render_widget(panel, area);
}

fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let registering = app.mode == AppMode::Register;
    let masked = |value: &str| "•".repeat(value.chars().count());
    let fields: Vec<(&str, String)> = if registering {
        vec![
            ("Name", app.register_form.name.clone()),
            ("Email", app.register_form.email.clone()),
            ("Number Phone", app.register_form.phone.clone()),
            ("Password", masked(app.register_form.password.as_str())),
        ]
    } else {
        vec![
            ("Email", app.login_form.email.clone()),
            ("Password", masked(app.login_form.password.as_str())),
        ]
    };

    let editing = matches!(app.mode, AppMode::Login | AppMode::Register);
    let mut lines = Vec::new();
    for (i, (label, value)) in fields.into_iter().enumerate() {
        let style = if editing && i == app.form_field {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>13}: ", label), style),
            Span::raw(value),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(if editing {
        "[Tab] Next field  [Enter] Submit  [Ctrl+N] Switch login/register  [Esc] Cancel"
    } else {
        "[Enter] Start typing"
    }));

    let title = if registering { "Register" } else { "Login" };
    let popup = centered(area, 70, 12);
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)), popup);
}

fn render_review_popup(f: &mut Frame, app: &App) {
    let popup = centered(f.area(), 60, 9);
    f.render_widget(Clear, popup);
    let restaurant = app
        .selected_order()
        .map(|order| order.restaurant_name.as_str())
        .unwrap_or("");
    let stars = format!(
        "{}{}",
        "★".repeat(app.review_draft.star as usize),
        "☆".repeat(5usize.saturating_sub(app.review_draft.star as usize))
    );
    let lines = vec![
        Line::from(format!("Give Rating  {}  [↑/↓]", stars)),
        Line::from(""),
        Line::from(app.review_draft.comment.clone()),
        Line::from(""),
        Line::from(Span::styled("[Enter] Send  [Esc] Cancel", Style::default().fg(Color::DarkGray))),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!("Review {}", restaurant)))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                normal_hint(app).to_string()
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Search => format!("Search: {} (Enter to apply, Esc to cancel)", app.input),
        AppMode::Category => format!("Category: {} (empty for all, Enter to apply, Esc to cancel)", app.input),
        AppMode::PriceMin => format!("Min price: {} (Enter to apply, Esc to cancel)", app.input),
        AppMode::PriceMax => format!("Max price: {} (Enter to apply, Esc to cancel)", app.input),
        AppMode::OrderSearch => format!("Search orders: {} (Enter to apply, Esc to cancel)", app.input),
        AppMode::ExportOrders => format!("Export orders as: {} (Enter to export, Esc to cancel)", app.input),
        AppMode::Login | AppMode::Register | AppMode::Review => app.status_message.clone().unwrap_or_default(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportOrders => Style::default().fg(Color::Magenta),
            AppMode::Login | AppMode::Register | AppMode::Review => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::Green),
        });
    f.render_widget(input, area);
}

fn normal_hint(app: &App) -> &'static str {
    match app.screen {
        Screen::Restaurants if app.filters.drawer_open => "d/m/M/0-5/c/s: filters | x: reset | f/Esc: close",
        Screen::Restaurants => "Enter: open | f: filter | /: search | n/p: page | l: login | 1-4: pages | ?: help | q: quit",
        Screen::Detail => "Enter/+: add | -: remove | Tab: menu | v: more reviews | c: checkout | Esc: back",
        Screen::Cart => "+/-: quantity | x: clear restaurant | X: clear all | c: checkout restaurant | C: checkout all",
        Screen::Checkout => "p: payment method | +/-: quantity | Enter: buy | Esc: back to cart",
        Screen::Receipt => "Enter: back to home",
        Screen::Orders => "Tab/Shift+Tab: status | /: search | w: review | e: export CSV | r: refresh",
        Screen::Profile => "r: refresh | l: logout",
        Screen::Login => "Enter: log in",
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tsfood Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"TSFOOD KEYBOARD REFERENCE

=== PAGES ===
1               Restaurants
2               My Cart
3               My Orders (requires login)
4               Profile (requires login)
↑↓ or j/k       Move selection, PgUp/PgDn to jump
q               Quit application

=== RESTAURANTS ===
Enter           Open the selected restaurant
/               Search by name
n / p           Next / previous results page
r               Reload the current page
l               Log in, or log out when logged in
f               Open or close the filter drawer

=== FILTER DRAWER ===
d               Distance: nearby → 1 km → 3 km → 5 km → any
m / M           Minimum / maximum price
0-5             Minimum rating (0 clears it)
c               Category (empty for all)
s               Sort: rating, price low to high, price high to low
x               Reset every filter
                Sorting applies to the loaded page only

=== RESTAURANT ===
Enter or +      Add the selected menu item to the cart
-               Remove one of the selected item
Tab             Switch between All Menu / Food / Drink
v               Load more reviews
c               Check out this restaurant
Esc             Back to the list

=== CART AND CHECKOUT ===
+ / -           Change quantity; at one, - removes the line
x               Remove every line of the selected restaurant
X               Empty the cart
c / C           Check out the selected restaurant / the whole cart
p               Cycle payment method
Enter           Buy: shows the receipt and empties the purchased lines
                Delivery fee Rp10.000 and service fee Rp1.000 are added

=== ORDERS ===
Tab / Shift+Tab Switch order status
/               Search orders
w               Review the selected order (↑↓ sets stars)
e               Export the listed orders to CSV

=== LOGIN ===
Tab             Next field
Ctrl+N          Switch between login and register
Enter           Submit
Esc             Cancel

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
}
