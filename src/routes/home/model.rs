use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::utils::image_data_uri;

/// blogs 表的原始行，图片为数据库中的二进制内容
#[derive(Debug, FromRow)]
pub struct BlogRow {
    pub blog_img: Vec<u8>,
    pub blog_title: String,
    pub blog_description: String,
    pub created_at: DateTime<Utc>,
    pub blog_link: String,
}

/// courses 表的原始行
#[derive(Debug, FromRow)]
pub struct CourseRow {
    pub course_img: Vec<u8>,
    pub coursename: String,
    pub price: f64,
    pub link: String,
}

/// 渲染用的博客条目，图片已转为 data URI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogCard {
    pub blog_img: String,
    pub blog_title: String,
    pub blog_description: String,
    pub created_at: DateTime<Utc>,
    pub blog_link: String,
}

/// 渲染用的课程条目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseCard {
    pub course_img: String,
    pub coursename: String,
    pub price: f64,
    pub link: String,
}

/// 首页聚合数据，同时也是缓存的载荷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeData {
    pub blogs: Vec<BlogCard>,
    pub free_courses: Vec<CourseCard>,
    pub paid_courses: Vec<CourseCard>,
}

impl From<BlogRow> for BlogCard {
    fn from(row: BlogRow) -> Self {
        BlogCard {
            blog_img: image_data_uri(&row.blog_img),
            blog_title: row.blog_title,
            blog_description: row.blog_description,
            created_at: row.created_at,
            blog_link: row.blog_link,
        }
    }
}

impl From<CourseRow> for CourseCard {
    fn from(row: CourseRow) -> Self {
        CourseCard {
            course_img: image_data_uri(&row.course_img),
            coursename: row.coursename,
            price: row.price,
            link: row.link,
        }
    }
}

impl HomeData {
    /// 缓存未命中时从数据库加载：三条独立查询，免费/付费课程按价格划分
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let blogs = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT blog_img, blog_title, blog_description, created_at, blog_link
            FROM blogs
            "#,
        )
        .fetch_all(pool)
        .await?;

        let free_courses = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT course_img, coursename, price, link
            FROM courses
            WHERE price = 0
            "#,
        )
        .fetch_all(pool)
        .await?;

        let paid_courses = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT course_img, coursename, price, link
            FROM courses
            WHERE price > 0
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(HomeData {
            blogs: blogs.into_iter().map(BlogCard::from).collect(),
            free_courses: free_courses.into_iter().map(CourseCard::from).collect(),
            paid_courses: paid_courses.into_iter().map(CourseCard::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    fn sample_home() -> HomeData {
        let course_row = CourseRow {
            course_img: vec![0xFF, 0xD8, 0xFF, 0xE0],
            coursename: "Intro to Physics".into(),
            price: 0.0,
            link: "http://x".into(),
        };
        let blog_row = BlogRow {
            blog_img: vec![1, 2, 3],
            blog_title: "标题".into(),
            blog_description: "描述".into(),
            created_at: Utc::now(),
            blog_link: "http://y".into(),
        };
        HomeData {
            blogs: vec![blog_row.into()],
            free_courses: vec![course_row.into()],
            paid_courses: vec![],
        }
    }

    #[test]
    fn cards_carry_jpeg_data_uris() {
        let home = sample_home();
        let img = &home.free_courses[0].course_img;
        let encoded = img
            .strip_prefix("data:image/jpeg;base64,")
            .expect("data URI prefix");
        assert_eq!(
            BASE64.decode(encoded).unwrap(),
            vec![0xFF, 0xD8, 0xFF, 0xE0]
        );
    }

    // 缓存载荷经 JSON 往返后必须与原模型完全一致
    #[test]
    fn home_data_survives_cache_round_trip() {
        let home = sample_home();
        let json = serde_json::to_string(&home).unwrap();
        let back: HomeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, home);
    }
}
