use sqlx::PgPool;

/// 待插入的课程行
#[derive(Debug)]
pub struct NewCourse {
    pub image: Vec<u8>,
    pub coursename: String,
    pub price: f64,
    pub course_type: String,
    pub link: String,
}

/// 待插入的博客行，created_at 由数据库默认值生成
#[derive(Debug)]
pub struct NewBlog {
    pub title: String,
    pub description: String,
    pub image: Vec<u8>,
    pub category: String,
    pub link: String,
}

impl NewCourse {
    pub async fn insert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO courses (course_img, coursename, price, course_type, link)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&self.image)
        .bind(&self.coursename)
        .bind(self.price)
        .bind(&self.course_type)
        .bind(&self.link)
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl NewBlog {
    pub async fn insert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO blogs (blog_title, blog_description, blog_img, category, blog_link)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.image)
        .bind(&self.category)
        .bind(&self.link)
        .execute(pool)
        .await?;

        Ok(())
    }
}
