//! In-memory evaluation of conference queries.
//!
//! Mirrors datastore semantics: a predicate on a repeated property holds
//! when any element satisfies it, and ascending sorts on a repeated
//! property use its smallest element.

use super::plan::{ConferenceQuery, DEFAULT_ORDER_FIELD, Sort, SortDir};
use crate::conference::{Conference, PropertyValue};
use crate::filter::{Field, Filter, FilterValue};
use std::cmp::Ordering;

impl ConferenceQuery {
    /// Whether a conference satisfies every filter predicate.
    pub fn matches(&self, conference: &Conference) -> bool {
        self.filters().iter().all(|f| filter_matches(f, conference))
    }

    /// Filter and order conferences.
    ///
    /// ```
    /// use conf_query::{Conference, ConferenceForm, ConferenceQuery, RawFilter};
    ///
    /// let confs: Vec<Conference> = [("B", 10), ("A", 300), ("C", 20)]
    ///     .into_iter()
    ///     .map(|(name, max)| Conference::from_form(ConferenceForm {
    ///         name: Some(name.into()),
    ///         max_attendees: Some(max),
    ///         ..ConferenceForm::default()
    ///     }, "u1").unwrap())
    ///     .collect();
    ///
    /// let query = ConferenceQuery::from_raw(&[RawFilter::new("MAX_ATTENDEES", "LT", "100")]).unwrap();
    /// let names: Vec<_> = query.run(&confs).iter().map(|c| c.name.as_str()).collect();
    /// assert_eq!(names, ["B", "C"]);
    /// ```
    pub fn run<'a>(&self, conferences: &'a [Conference]) -> Vec<&'a Conference> {
        let mut matched: Vec<&Conference> =
            conferences.iter().filter(|c| self.matches(c)).collect();
        matched.sort_by(|a, b| compare_by(self.sorts(), a, b));
        log::debug!(
            "conference query matched {} of {}",
            matched.len(),
            conferences.len()
        );
        matched
    }
}

fn filter_matches(filter: &Filter, conference: &Conference) -> bool {
    match (conference.property(filter.field), &filter.value) {
        (PropertyValue::Int(actual), FilterValue::Int(expected)) => {
            filter.op.compare(&actual, expected)
        },
        (PropertyValue::Str(actual), FilterValue::String(expected)) => {
            filter.op.compare(actual, expected.as_str())
        },
        (PropertyValue::List(items), FilterValue::String(expected)) => items
            .iter()
            .any(|item| filter.op.compare(item.as_str(), expected.as_str())),
        _ => false,
    }
}

fn compare_by(sorts: &[Sort], a: &Conference, b: &Conference) -> Ordering {
    sorts
        .iter()
        .map(|sort| {
            let ord = compare_property(sort.property, a, b);
            match sort.dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_property(property: &str, a: &Conference, b: &Conference) -> Ordering {
    if property == DEFAULT_ORDER_FIELD {
        return a.name.cmp(&b.name);
    }
    let Some(field) = Field::ALL.into_iter().find(|f| f.property() == property) else {
        return Ordering::Equal;
    };
    match (a.property(field), b.property(field)) {
        (PropertyValue::Int(x), PropertyValue::Int(y)) => x.cmp(&y),
        (PropertyValue::Str(x), PropertyValue::Str(y)) => x.cmp(y),
        (PropertyValue::List(x), PropertyValue::List(y)) => x.iter().min().cmp(&y.iter().min()),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conference::ConferenceForm;
    use crate::filter::RawFilter;

    fn conf(name: &str, city: &str, topics: &[&str], max: i64, start: &str) -> Conference {
        Conference::from_form(
            ConferenceForm {
                name: Some(name.into()),
                city: Some(city.into()),
                topics: Some(topics.iter().map(|t| (*t).to_string()).collect()),
                max_attendees: Some(max),
                start_date: Some(start.into()),
                ..ConferenceForm::default()
            },
            "organizer",
        )
        .unwrap()
    }

    fn fixtures() -> Vec<Conference> {
        vec![
            conf("RustConf", "Portland", &["Rust", "Systems"], 500, "2024-09-10"),
            conf("PyCon", "Pittsburgh", &["Python"], 3000, "2024-05-15"),
            conf("JSConf", "Berlin", &["Web", "JavaScript"], 40, "2024-06-02"),
            conf("Meetup", "Berlin", &["Rust"], 30, "2024-06-20"),
        ]
    }

    fn names(query: &ConferenceQuery, confs: &[Conference]) -> Vec<String> {
        query.run(confs).iter().map(|c| c.name.clone()).collect()
    }

    fn plan(raw: &[(&str, &str, &str)]) -> ConferenceQuery {
        let raw: Vec<_> = raw
            .iter()
            .map(|(f, o, v)| RawFilter::new(*f, *o, *v))
            .collect();
        ConferenceQuery::from_raw(&raw).unwrap()
    }

    #[test]
    fn test_no_filters_sorted_by_name() {
        let confs = fixtures();
        assert_eq!(
            names(&plan(&[]), &confs),
            vec!["JSConf", "Meetup", "PyCon", "RustConf"]
        );
    }

    #[test]
    fn test_inequality_then_equality() {
        let confs = fixtures();
        let query = plan(&[("MAX_ATTENDEES", "LT", "50"), ("MONTH", "EQ", "6")]);
        // Ordered by maxAttendees first
        assert_eq!(names(&query, &confs), vec!["Meetup", "JSConf"]);
    }

    #[test]
    fn test_repeated_property_any_element() {
        let confs = fixtures();
        let query = plan(&[("TOPIC", "EQ", "Rust")]);
        assert_eq!(names(&query, &confs), vec!["Meetup", "RustConf"]);

        // NE holds if any topic differs
        let query = plan(&[("TOPIC", "NE", "Rust")]);
        assert_eq!(names(&query, &confs), vec!["JSConf", "PyCon", "RustConf"]);
    }

    #[test]
    fn test_repeated_property_sorted_by_smallest_element() {
        let confs = vec![
            conf("A", "Oslo", &["b", "z"], 10, "2024-01-01"),
            conf("B", "Oslo", &["a", "zz"], 10, "2024-01-01"),
            conf("C", "Oslo", &["c", "a"], 10, "2024-01-01"),
        ];
        let query = plan(&[("TOPIC", "GT", "0")]);
        assert_eq!(names(&query, &confs), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_string_inequality_sorted_by_field() {
        let confs = fixtures();
        let query = plan(&[("CITY", "GTEQ", "C")]);
        assert_eq!(names(&query, &confs), vec!["PyCon", "RustConf"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let confs = fixtures();
        let query = plan(&[("CITY", "LT", "C")]);
        assert_eq!(names(&query, &confs), vec!["JSConf", "Meetup"]);
    }

    #[test]
    fn test_descending_sort_reverses() {
        let confs = fixtures();
        let sorts = [Sort {
            property: "maxAttendees",
            dir: SortDir::Desc,
        }];
        assert_eq!(compare_by(&sorts, &confs[0], &confs[1]), Ordering::Greater);
    }

    #[test]
    fn test_matches_single_conference() {
        let confs = fixtures();
        let query = plan(&[("CITY", "EQ", "Berlin"), ("MONTH", "EQ", "6")]);
        assert!(query.matches(&confs[2]));
        assert!(!query.matches(&confs[0]));
    }

    #[test]
    fn test_no_matches() {
        let confs = fixtures();
        let query = plan(&[("MONTH", "EQ", "1")]);
        assert!(query.run(&confs).is_empty());
    }
}
