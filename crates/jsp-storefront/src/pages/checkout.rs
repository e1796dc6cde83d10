//! Checkout page.

use chrono::NaiveDate;
use jsp_cache::KvStore;
use jsp_commerce::cart::CartLine;
use jsp_commerce::checkout::{checkout, checkout_on, CheckoutForm, OrderSummary};
use jsp_commerce::{CommerceError, Money};
use jsp_render::html::{Element, Node};
use jsp_render::routes;

use super::Page;
use crate::app::{page_title, Storefront};
use crate::browser::Location;
use crate::StorefrontError;

/// Form inputs: name, label, input type.
const FIELDS: [(&str, &str, &str); 6] = [
    ("fullName", "Full Name", "text"),
    ("phoneNumber", "Phone Number", "tel"),
    ("email", "Email", "email"),
    ("dob", "Date of Birth", "date"),
    ("address", "Address", "textarea"),
    ("notes", "Notes", "textarea"),
];

const OPTIONAL_FIELDS: [&str; 1] = ["notes"];

/// Why the last submit was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A field is invalid; shown next to that field.
    Field { field: &'static str, message: String },
    /// Shown above the form.
    Form(String),
}

/// Checkout form over the current cart.
#[derive(Debug)]
pub struct CheckoutPage<'a, L, S> {
    app: &'a Storefront<L, S>,
    location: Location,
    form: CheckoutForm,
    error: Option<SubmitError>,
}

impl<'a, L: KvStore, S: KvStore> CheckoutPage<'a, L, S> {
    pub fn new(app: &'a Storefront<L, S>, location: Location) -> Self {
        Self {
            app,
            location,
            form: CheckoutForm::default(),
            error: None,
        }
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Error from the last submit, if it was refused.
    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    /// Type into the input named `name`. Returns false for an unknown input.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "fullName" => &mut self.form.full_name,
            "phoneNumber" => &mut self.form.phone_number,
            "email" => &mut self.form.email,
            "dob" => &mut self.form.dob,
            "address" => &mut self.form.address,
            "notes" => &mut self.form.notes,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Replace every field at once.
    pub fn fill(&mut self, form: CheckoutForm) {
        self.form = form;
    }

    /// Lines that will be ordered.
    pub fn lines(&self) -> Vec<CartLine> {
        self.app
            .carts()
            .get()
            .resolved(self.app.catalog())
            .cloned()
            .collect()
    }

    /// Place the order and return where to go next.
    ///
    /// A refused submit keeps the entered values and records the error for
    /// the view.
    pub fn submit(&mut self) -> Result<Location, StorefrontError> {
        let result = checkout(
            self.app.carts(),
            self.app.session(),
            self.app.catalog(),
            &self.form,
        );
        self.finish(result)
    }

    /// [`CheckoutPage::submit`] with a fixed date for age checks.
    pub fn submit_on(&mut self, today: NaiveDate) -> Result<Location, StorefrontError> {
        let result = checkout_on(
            self.app.carts(),
            self.app.session(),
            self.app.catalog(),
            &self.form,
            today,
        );
        self.finish(result)
    }

    fn finish(
        &mut self,
        result: Result<OrderSummary, CommerceError>,
    ) -> Result<Location, StorefrontError> {
        match result {
            Ok(_) => {
                self.error = None;
                self.app.location(routes::ORDER_SUMMARY)
            }
            Err(CommerceError::Validation { field, message }) => {
                self.error = Some(SubmitError::Field {
                    field,
                    message: message.clone(),
                });
                Err(CommerceError::Validation { field, message }.into())
            }
            Err(e) => {
                self.error = Some(SubmitError::Form(e.to_string()));
                Err(e.into())
            }
        }
    }

    fn field_value(&self, name: &str) -> &str {
        match name {
            "fullName" => &self.form.full_name,
            "phoneNumber" => &self.form.phone_number,
            "email" => &self.form.email,
            "dob" => &self.form.dob,
            "address" => &self.form.address,
            "notes" => &self.form.notes,
            _ => "",
        }
    }

    fn field_view(&self, name: &str, label: &str, kind: &str) -> Node {
        let input = if kind == "textarea" {
            Element::new("textarea")
                .attr("name", name)
                .attr("id", name)
                .text(self.field_value(name))
        } else {
            Element::new("input")
                .attr("type", kind)
                .attr("name", name)
                .attr("id", name)
                .attr("value", self.field_value(name))
        };
        let input = input.flag("required", !OPTIONAL_FIELDS.iter().any(|f| *f == name));

        let mut field = Element::new("div")
            .class("field")
            .child(Element::new("label").attr("for", name).text(label))
            .child(input);
        if let Some(SubmitError::Field { field: f, message }) = &self.error {
            if *f == name {
                field.add_class("invalid");
                field = field.child(
                    Element::new("p")
                        .class("field-error")
                        .text(format!("{} {}", label, message)),
                );
            }
        }
        field.into()
    }
}

impl<L: KvStore, S: KvStore> Page for CheckoutPage<'_, L, S> {
    fn location(&self) -> &Location {
        &self.location
    }

    fn title(&self) -> String {
        page_title("Checkout")
    }

    fn view(&self) -> Vec<Node> {
        let mut form = Element::new("form")
            .class("checkout-form")
            .attr("method", "post");
        if let Some(SubmitError::Form(message)) = &self.error {
            form = form.child(Element::new("p").class("form-error").text(message.as_str()));
        }
        form = form
            .children(
                FIELDS
                    .iter()
                    .map(|(name, label, kind)| self.field_view(name, label, kind)),
            )
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .text("Place order"),
            );

        let lines = self.lines();
        let total = Money::checked_sum(lines.iter().filter_map(|l| l.subtotal().ok()))
            .map(|m| m.display())
            .unwrap_or_default();
        let items = lines.iter().map(|line| {
            Element::new("li")
                .child(Element::new("span").class("name").text(line.name.as_str()))
                .child(
                    Element::new("span")
                        .class("amount")
                        .text(format!("x{}", line.amount)),
                )
                .child(
                    Element::new("span")
                        .class("price")
                        .text(line.subtotal().map(|m| m.display()).unwrap_or_default()),
                )
                .into()
        });
        let order = Element::new("aside")
            .class("order")
            .child(Element::new("ul").class("order-items").children(items))
            .child(
                Element::new("div")
                    .class("total")
                    .text("Total ")
                    .child(Element::new("span").class("price").text(total)),
            );

        vec![
            Element::new("h1").text("Checkout").into(),
            form.into(),
            order.into(),
        ]
    }
}
