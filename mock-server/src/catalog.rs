use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub sub_title: String,
    pub author: String,
    #[serde(rename = "publish_date")]
    pub publish_date: String,
    pub publisher: String,
    pub pages: u32,
    pub description: String,
    pub website: String,
}

fn book(
    isbn: &str,
    title: &str,
    sub_title: &str,
    author: &str,
    publisher: &str,
    pages: u32,
    website: &str,
) -> Book {
    Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        sub_title: sub_title.to_string(),
        author: author.to_string(),
        publish_date: "2020-06-04T08:48:39.000Z".to_string(),
        publisher: publisher.to_string(),
        pages,
        description: format!("{title}: {sub_title}"),
        website: website.to_string(),
    }
}

/// The eight books served by the public demo store.
pub fn default_catalog() -> Vec<Book> {
    vec![
        book(
            "9781449325862",
            "Git Pocket Guide",
            "A Working Introduction",
            "Richard E. Silverman",
            "O'Reilly Media",
            234,
            "http://chimera.labs.oreilly.com/books/1230000000561/index.html",
        ),
        book(
            "9781449331818",
            "Learning JavaScript Design Patterns",
            "A JavaScript and jQuery Developer's Guide",
            "Addy Osmani",
            "O'Reilly Media",
            254,
            "http://www.addyosmani.com/resources/essentialjsdesignpatterns/book/",
        ),
        book(
            "9781449337711",
            "Designing Evolvable Web APIs with ASP.NET",
            "Harnessing the Power of the Web",
            "Glenn Block et al.",
            "O'Reilly Media",
            238,
            "http://chimera.labs.oreilly.com/books/1234000001708/index.html",
        ),
        book(
            "9781449365035",
            "Speaking JavaScript",
            "An In-Depth Guide for Programmers",
            "Axel Rauschmayer",
            "O'Reilly Media",
            460,
            "http://speakingjs.com/",
        ),
        book(
            "9781491904244",
            "You Don't Know JS",
            "ES6 & Beyond",
            "Kyle Simpson",
            "O'Reilly Media",
            278,
            "https://github.com/getify/You-Dont-Know-JS/tree/master/es6%20&%20beyond",
        ),
        book(
            "9781491950296",
            "Programming JavaScript Applications",
            "Robust Web Architecture with Node, HTML5, and Modern JS Libraries",
            "Eric Elliott",
            "O'Reilly Media",
            254,
            "http://chimera.labs.oreilly.com/books/1234000000262/index.html",
        ),
        book(
            "9781593275846",
            "Eloquent JavaScript, Second Edition",
            "A Modern Introduction to Programming",
            "Marijn Haverbeke",
            "No Starch Press",
            472,
            "http://eloquentjavascript.net/",
        ),
        book(
            "9781593277574",
            "Understanding ECMAScript 6",
            "The Definitive Guide for JavaScript Developers",
            "Nicholas C. Zakas",
            "No Starch Press",
            352,
            "https://leanpub.com/understandinges6/read",
        ),
    ]
}
