//! The bundled demo dataset.
//!
//! Three topics (`paper` has no articles), four users, twelve articles of
//! which one is about `cats`, and eighteen comments. Article 1 starts at
//! 100 votes and carries eleven comments; article 2 has none.

use chrono::{DateTime, NaiveDate, Utc};

use crate::news::models::{Article, Comment, Topic, User};

use super::memory::Dataset;

const IMG_URL: &str =
    "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|ts| ts.and_utc())
        .unwrap_or_default()
}

fn topic(slug: &str, description: &str) -> Topic {
    Topic {
        slug: slug.to_string(),
        description: description.to_string(),
    }
}

fn user(username: &str, name: &str, avatar_url: &str) -> User {
    User {
        username: username.to_string(),
        name: name.to_string(),
        avatar_url: avatar_url.to_string(),
    }
}

fn article(
    article_id: i64,
    title: &str,
    topic: &str,
    author: &str,
    body: &str,
    created_at: DateTime<Utc>,
    votes: i64,
) -> Article {
    Article {
        article_id,
        title: title.to_string(),
        topic: topic.to_string(),
        author: author.to_string(),
        body: body.to_string(),
        created_at,
        votes,
        article_img_url: IMG_URL.to_string(),
        comment_count: None,
    }
}

fn comment(
    comment_id: i64,
    body: &str,
    article_id: i64,
    author: &str,
    votes: i64,
    created_at: DateTime<Utc>,
) -> Comment {
    Comment {
        comment_id,
        body: body.to_string(),
        article_id,
        author: author.to_string(),
        votes,
        created_at,
    }
}

pub fn demo_dataset() -> Dataset {
    let topics = vec![
        topic("mitch", "The man, the Mitch, the legend"),
        topic("cats", "Not dogs"),
        topic("paper", "what books are made of"),
    ];

    let users = vec![
        user(
            "butter_bridge",
            "jonny",
            "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg",
        ),
        user(
            "icellusedkars",
            "sam",
            "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4",
        ),
        user(
            "rogersop",
            "paul",
            "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4",
        ),
        user(
            "lurker",
            "do_nothing",
            "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png",
        ),
    ];

    let articles = vec![
        article(1, "Living in the shadow of a great man", "mitch", "butter_bridge",
            "I find this existence challenging", at(2020, 7, 9, 20, 11), 100),
        article(2, "Sony Vaio; or, The Laptop", "mitch", "icellusedkars",
            "Call me Mitchell. Some years ago I thought I would buy a laptop.",
            at(2020, 10, 16, 5, 3), 0),
        article(3, "Eight pug gifs that remind me of mitch", "mitch", "icellusedkars",
            "some gifs", at(2020, 11, 3, 9, 12), 0),
        article(4, "Student SUES Mitch!", "mitch", "rogersop",
            "We all love Mitch and his wonderful, unique typing style.",
            at(2020, 5, 6, 1, 14), 0),
        article(5, "UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop",
            "Bastet walks amongst us, and the cats are taking arms!",
            at(2020, 8, 3, 13, 14), 0),
        article(6, "A", "mitch", "icellusedkars", "Delicious tin of cat food",
            at(2020, 10, 18, 1, 0), 0),
        article(7, "Z", "mitch", "icellusedkars", "I was hungry.",
            at(2020, 1, 7, 14, 8), 0),
        article(8, "Does Mitch predate civilisation?", "mitch", "icellusedkars",
            "Archaeologists have uncovered a gigantic statue from the dawn of humanity.",
            at(2020, 4, 17, 1, 8), 0),
        article(9, "They're not exactly dogs, are they?", "mitch", "butter_bridge",
            "Well? Think about it.", at(2020, 6, 6, 9, 10), 0),
        article(10, "Seven inspirational thought leaders from Manchester UK", "mitch",
            "rogersop", "Who are we kidding, there is only one, and it's Mitch!",
            at(2020, 5, 14, 4, 15), 0),
        article(11, "Am I a cat?", "mitch", "icellusedkars",
            "Having run out of ideas for articles, I am staring at the wall blankly.",
            at(2020, 1, 15, 22, 21), 0),
        article(12, "Moustache", "mitch", "butter_bridge",
            "Have you seen the size of that thing?", at(2020, 10, 11, 11, 24), 0),
    ];

    let comments = vec![
        comment(1, "Oh, I've got compassion running out of my nose, pal! I'm the Sultan of Sentiment!",
            9, "butter_bridge", 16, at(2020, 4, 6, 12, 17)),
        comment(2, "The beautiful thing about treasure is that it exists. Got to find out what kind of sheets these are; not cotton, not rayon, silky.",
            1, "butter_bridge", 14, at(2020, 10, 31, 3, 3)),
        comment(3, "Replacing the quiet elegance of the dark suit and tie with the casual indifference of these muted earth tones is a form of fashion suicide, but, uh, call me crazy, on you it works.",
            1, "icellusedkars", 100, at(2020, 3, 1, 1, 13)),
        comment(4, "I carry a log, yes. Is it funny to you? It is not to me.",
            1, "icellusedkars", -100, at(2020, 2, 23, 12, 1)),
        comment(5, "I hate streaming noses", 1, "icellusedkars", 0, at(2020, 11, 3, 21, 0)),
        comment(6, "I hate streaming eyes even more", 1, "icellusedkars", 0, at(2020, 4, 11, 21, 2)),
        comment(7, "Lobster pot", 1, "icellusedkars", 0, at(2020, 5, 15, 20, 19)),
        comment(8, "Delicious crackerbreads", 1, "icellusedkars", 0, at(2020, 4, 14, 20, 19)),
        comment(9, "Superficially charming", 1, "icellusedkars", 0, at(2020, 1, 1, 3, 8)),
        comment(10, "git push origin master", 3, "icellusedkars", 0, at(2020, 6, 20, 7, 24)),
        comment(11, "Ambidextrous marsupial", 3, "icellusedkars", 0, at(2020, 9, 19, 23, 10)),
        comment(12, "Massive intercranial brain haemorrhage", 1, "icellusedkars", 0,
            at(2020, 3, 2, 7, 10)),
        comment(13, "Fruit pastilles", 1, "icellusedkars", 0, at(2020, 6, 15, 10, 25)),
        comment(14, "What do you see? I have no idea where this will lead us. This place I speak of, is known as the Black Lodge.",
            5, "icellusedkars", 16, at(2020, 6, 9, 5, 0)),
        comment(15, "I am 100% sure that we're not completely sure.", 5, "butter_bridge", 1,
            at(2020, 11, 24, 0, 8)),
        comment(16, "This is a bad article name", 6, "butter_bridge", 1, at(2020, 10, 11, 15, 23)),
        comment(17, "The owls are not what they seem.", 9, "icellusedkars", 20,
            at(2020, 3, 14, 17, 2)),
        comment(18, "This morning, I showered for nine minutes.", 1, "butter_bridge", 16,
            at(2020, 7, 21, 0, 20)),
    ];

    Dataset {
        topics,
        users,
        articles,
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dataset_shape() {
        let data = demo_dataset();
        assert_eq!(data.topics.len(), 3);
        assert_eq!(data.articles.len(), 12);
        assert_eq!(data.articles.iter().filter(|a| a.topic == "cats").count(), 1);
        assert_eq!(data.articles.iter().filter(|a| a.topic == "paper").count(), 0);
        assert_eq!(data.comments.iter().filter(|c| c.article_id == 1).count(), 11);
    }

    #[test]
    fn test_timestamps_are_real() {
        let data = demo_dataset();
        assert!(data.articles.iter().all(|a| a.created_at > DateTime::<Utc>::default()));
    }

    #[test]
    fn test_references_resolve() {
        let data = demo_dataset();
        for a in &data.articles {
            assert!(data.topics.iter().any(|t| t.slug == a.topic));
            assert!(data.users.iter().any(|u| u.username == a.author));
        }
        for c in &data.comments {
            assert!(data.articles.iter().any(|a| a.article_id == c.article_id));
            assert!(data.users.iter().any(|u| u.username == c.author));
        }
    }
}
