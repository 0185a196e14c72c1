//! HTML rendering for list pages and forms.
//!
//! Plain string templates; every value that came from a datastore or a
//! form goes through [`escape`], and ids placed in a URL path through
//! [`path_segment`].

use std::fmt::Write;

use crate::db::{ProductListing, Store};
use crate::docs::Manager;

/// Escape text for an HTML body or a double-quoted attribute.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Percent-encode an id for use as one URL path segment.
pub fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n<p><a href=\"/\">Home</a></p>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn home() -> String {
    page(
        "Storedesk",
        "<ul>\n\
         <li><a href=\"/products\">Products</a></li>\n\
         <li><a href=\"/stores\">Stores</a></li>\n\
         <li><a href=\"/managers\">Managers</a></li>\n\
         </ul>",
    )
}

pub fn products_page(rows: &[ProductListing]) -> String {
    let mut body = String::from(
        "<table>\n<tr><th>Product ID</th><th>Description</th><th>Supplier</th>\
         <th>Store ID</th><th>Location</th><th>Price</th><th></th></tr>\n",
    );
    for row in rows {
        let price = row.price.map(|p| format!("{p:.2}")).unwrap_or_default();
        let _ = writeln!(
            body,
            "<tr><td>{pid}</td><td>{desc}</td><td>{supplier}</td><td>{sid}</td>\
             <td>{location}</td><td>{price}</td>\
             <td><a href=\"/products/delete/{href}\">Delete</a></td></tr>",
            pid = escape(&row.pid),
            href = path_segment(&row.pid),
            desc = escape(&row.productdesc),
            supplier = escape(row.supplier.as_deref().unwrap_or("")),
            sid = escape(row.sid.as_deref().unwrap_or("")),
            location = escape(row.location.as_deref().unwrap_or("")),
        );
    }
    body.push_str("</table>");
    page("Products", &body)
}

pub fn stores_page(stores: &[Store]) -> String {
    let mut body = String::from(
        "<p><a href=\"/stores/add\">Add Store</a></p>\n<table>\n\
         <tr><th>Store ID</th><th>Location</th><th>Manager ID</th><th></th><th></th></tr>\n",
    );
    for store in stores {
        let sid = escape(&store.sid);
        let href = path_segment(&store.sid);
        let _ = writeln!(
            body,
            "<tr><td>{sid}</td><td>{location}</td><td>{mgrid}</td>\
             <td><a href=\"/stores/update/{href}\">Update</a></td>\
             <td><form method=\"post\" action=\"/stores/delete/{href}\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            location = escape(&store.location),
            mgrid = escape(&store.mgrid),
        );
    }
    body.push_str("</table>");
    page("Stores", &body)
}

pub fn managers_page(managers: &[Manager]) -> String {
    let mut body = String::from(
        "<p><a href=\"/managers/add\">Add Manager</a></p>\n<table>\n\
         <tr><th>Manager ID</th><th>Name</th><th>Salary</th><th></th><th></th></tr>\n",
    );
    for manager in managers {
        let id = escape(&manager.id);
        let href = path_segment(&manager.id);
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td>{name}</td><td>{salary}</td>\
             <td><a href=\"/managers/update/{href}\">Update</a></td>\
             <td><form method=\"post\" action=\"/managers/delete/{href}\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            name = escape(&manager.name),
            salary = manager.salary,
        );
    }
    body.push_str("</table>");
    page("Managers", &body)
}

pub fn add_store_form() -> String {
    page(
        "Add Store",
        "<form method=\"post\" action=\"/stores/add\">\n\
         <label>Store ID <input name=\"sid\"></label>\n\
         <label>Location <input name=\"location\"></label>\n\
         <label>Manager ID <input name=\"mgrid\" maxlength=\"4\"></label>\n\
         <button type=\"submit\">Add</button>\n</form>",
    )
}

pub fn update_store_form(store: &Store) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/stores/update/{href}\">\n\
         <p>Store ID: {sid}</p>\n\
         <label>Location <input name=\"newLocation\" value=\"{location}\"></label>\n\
         <label>Manager ID <input name=\"newmgrid\" maxlength=\"4\" value=\"{mgrid}\"></label>\n\
         <button type=\"submit\">Update</button>\n</form>",
        sid = escape(&store.sid),
        href = path_segment(&store.sid),
        location = escape(&store.location),
        mgrid = escape(&store.mgrid),
    );
    page("Update Store", &body)
}

pub fn add_manager_form() -> String {
    page(
        "Add Manager",
        "<form method=\"post\" action=\"/managers/add\">\n\
         <label>Manager ID <input name=\"_id\" maxlength=\"4\"></label>\n\
         <label>Name <input name=\"name\"></label>\n\
         <label>Salary <input name=\"salary\" type=\"number\"></label>\n\
         <button type=\"submit\">Add</button>\n</form>",
    )
}

pub fn update_manager_form(manager: &Manager) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/managers/update\">\n\
         <input type=\"hidden\" name=\"managerId\" value=\"{id}\">\n\
         <p>Manager ID: {id}</p>\n\
         <label>Name <input name=\"newName\" value=\"{name}\"></label>\n\
         <label>Salary <input name=\"newSalary\" type=\"number\" value=\"{salary}\"></label>\n\
         <button type=\"submit\">Update</button>\n</form>",
        id = escape(&manager.id),
        name = escape(&manager.name),
        salary = manager.salary,
    );
    page("Update Manager", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("Galway"), "Galway");
    }

    #[test]
    fn stores_page_escapes_values() {
        let html = stores_page(&[Store {
            sid: "PP-<1>".into(),
            location: "Cork".into(),
            mgrid: "M001".into(),
        }]);
        assert!(html.contains("PP-&lt;1&gt;"));
        assert!(!html.contains("PP-<1>"));
        assert!(html.contains("/stores/delete/PP-%3C1%3E"));
    }

    #[test]
    fn ids_with_path_characters_stay_one_segment() {
        let html = stores_page(&[Store {
            sid: "A/1?x#y".into(),
            location: "Cork".into(),
            mgrid: "M001".into(),
        }]);
        assert!(html.contains("href=\"/stores/update/A%2F1%3Fx%23y\""));
        assert!(html.contains("action=\"/stores/delete/A%2F1%3Fx%23y\""));
        assert!(html.contains("<td>A/1?x#y</td>"));

        let html = update_store_form(&Store {
            sid: "A/1".into(),
            location: "Cork".into(),
            mgrid: "M001".into(),
        });
        assert!(html.contains("action=\"/stores/update/A%2F1\""));
    }

    #[test]
    fn unstocked_product_renders_blank_store_columns() {
        let html = products_page(&[ProductListing {
            pid: "P009".into(),
            productdesc: "Oat Milk".into(),
            supplier: None,
            sid: None,
            location: None,
            price: None,
        }]);
        assert!(html.contains("<td>P009</td><td>Oat Milk</td><td></td><td></td><td></td><td></td>"));
        assert!(html.contains("/products/delete/P009"));
    }

    #[test]
    fn update_manager_form_carries_id() {
        let html = update_manager_form(&Manager {
            id: "M001".into(),
            name: "Sean Deegan".into(),
            salary: 62_000,
        });
        assert!(html.contains("name=\"managerId\" value=\"M001\""));
        assert!(html.contains("value=\"62000\""));
    }
}
