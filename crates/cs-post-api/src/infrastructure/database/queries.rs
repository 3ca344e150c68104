// Posts

/// Inserts nothing when the referenced document is missing or owned by someone else.
pub(super) const INSERT_POST_FOR_AUTHOR: &str = r#"
    INSERT INTO posts (
        post_author_user_id,
        post_title,
        post_description,
        post_visibility,
        post_document_id,
        post_summary_id
    )
    SELECT $1::BIGINT, $2::TEXT, $3::TEXT, $4::TEXT, $5::BIGINT, $6::BIGINT
    WHERE $5::BIGINT IS NULL
       OR EXISTS (
           SELECT 1
           FROM documents
           WHERE document_id = $5::BIGINT AND document_user_id = $1::BIGINT
       )
    RETURNING post_id
"#;

pub(super) const UPSERT_TAG: &str = r#"
    INSERT INTO tags (tag_name)
    VALUES ($1)
    ON CONFLICT (tag_name) DO UPDATE SET tag_name = EXCLUDED.tag_name
    RETURNING tag_id
"#;

pub(super) const LINK_POST_TAG: &str = r#"
    INSERT INTO post_tags (post_tag_post_id, post_tag_tag_id)
    VALUES ($1, $2)
    ON CONFLICT DO NOTHING
"#;

pub(super) const DELETE_POST_TAGS: &str = r#"
    DELETE FROM post_tags
    WHERE post_tag_post_id = $1
"#;

pub(super) const INSERT_POST_STATS: &str = r#"
    INSERT INTO post_stats (post_stats_post_id)
    VALUES ($1)
    ON CONFLICT (post_stats_post_id) DO NOTHING
"#;

pub(super) const UPDATE_POST: &str = r#"
    UPDATE posts
    SET post_title = $2,
        post_description = $3,
        post_visibility = $4,
        post_updated_at = NOW()
    WHERE post_id = $1
"#;

pub(super) const DELETE_POST: &str = r#"
    DELETE FROM posts
    WHERE post_id = $1
"#;

pub(super) const SELECT_POST_OWNER: &str = r#"
    SELECT post_author_user_id
    FROM posts
    WHERE post_id = $1
"#;

pub(super) const COUNT_POSTS_BY_AUTHOR: &str = r#"
    SELECT COUNT(*)
    FROM posts
    WHERE post_author_user_id = $1
"#;

macro_rules! select_post_views {
    () => {
        r#"
    SELECT
        p.post_id,
        p.post_author_user_id AS author_id,
        u.username AS author_name,
        p.post_title,
        p.post_description,
        p.post_visibility,
        p.post_document_id,
        p.post_summary_id,
        p.post_created_at,
        p.post_updated_at,
        d.document_url AS file_url,
        ARRAY(
            SELECT t.tag_name
            FROM post_tags pt
            JOIN tags t ON t.tag_id = pt.post_tag_tag_id
            WHERE pt.post_tag_post_id = p.post_id
            ORDER BY t.tag_name
        ) AS tags,
        COALESCE(s.post_like_count, 0) AS like_count,
        COALESCE(s.post_save_count, 0) AS save_count,
        s.post_last_activity_at AS last_activity_at
    FROM posts p
    JOIN users u ON u.user_id = p.post_author_user_id
    LEFT JOIN documents d ON d.document_id = p.post_document_id
    LEFT JOIN post_stats s ON s.post_stats_post_id = p.post_id
"#
    };
}

pub(super) const SELECT_ALL_POST_VIEWS: &str = concat!(
    select_post_views!(),
    "    ORDER BY p.post_created_at DESC, p.post_id DESC\n"
);

pub(super) const SELECT_POST_VIEW_BY_ID: &str =
    concat!(select_post_views!(), "    WHERE p.post_id = $1\n");

// Reactions

/// Serializes concurrent toggles on one post so every recount sees the
/// reactions committed before it.
pub(super) const LOCK_POST_STATS: &str = r#"
    SELECT post_stats_post_id
    FROM post_stats
    WHERE post_stats_post_id = $1
    FOR UPDATE
"#;

pub(super) const INSERT_LIKE: &str = r#"
    INSERT INTO likes (like_user_id, like_post_id)
    VALUES ($1, $2)
    ON CONFLICT (like_user_id, like_post_id) DO NOTHING
"#;

pub(super) const DELETE_LIKE: &str = r#"
    DELETE FROM likes
    WHERE like_user_id = $1 AND like_post_id = $2
"#;

pub(super) const RECOUNT_LIKES: &str = r#"
    UPDATE post_stats
    SET post_like_count = (SELECT COUNT(*) FROM likes WHERE like_post_id = $1),
        post_last_activity_at = NOW()
    WHERE post_stats_post_id = $1
    RETURNING post_like_count
"#;

pub(super) const SELECT_LIKE_EXISTS: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM likes WHERE like_user_id = $1 AND like_post_id = $2
    )
"#;

pub(super) const INSERT_SAVE: &str = r#"
    INSERT INTO saved_posts (save_user_id, save_post_id)
    VALUES ($1, $2)
    ON CONFLICT (save_user_id, save_post_id) DO NOTHING
"#;

pub(super) const DELETE_SAVE: &str = r#"
    DELETE FROM saved_posts
    WHERE save_user_id = $1 AND save_post_id = $2
"#;

pub(super) const RECOUNT_SAVES: &str = r#"
    UPDATE post_stats
    SET post_save_count = (SELECT COUNT(*) FROM saved_posts WHERE save_post_id = $1),
        post_last_activity_at = NOW()
    WHERE post_stats_post_id = $1
    RETURNING post_save_count
"#;

pub(super) const SELECT_SAVE_EXISTS: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM saved_posts WHERE save_user_id = $1 AND save_post_id = $2
    )
"#;

// Documents

pub(super) const INSERT_DOCUMENT: &str = r#"
    INSERT INTO documents (
        document_user_id,
        document_name,
        document_url,
        storage_provider,
        page_count
    ) VALUES ($1, $2, $3, $4, $5)
    RETURNING document_id, document_user_id, document_name, document_url,
              storage_provider, page_count, uploaded_at
"#;

pub(super) const SELECT_DOCUMENT_OWNER: &str = r#"
    SELECT document_user_id
    FROM documents
    WHERE document_id = $1
"#;

pub(super) const SELECT_DOCUMENTS_BY_OWNER: &str = r#"
    SELECT document_id, document_user_id, document_name, document_url,
           storage_provider, page_count, uploaded_at
    FROM documents
    WHERE document_user_id = $1
    ORDER BY uploaded_at DESC, document_id DESC
"#;

pub(super) const DELETE_DOCUMENT: &str = r#"
    DELETE FROM documents
    WHERE document_id = $1
"#;
