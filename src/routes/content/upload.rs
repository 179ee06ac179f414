use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use tokio::io::AsyncWriteExt;

/// 图片大小上限（字节）
pub const MAX_IMAGE_BYTES: u64 = 5_000_000;

/// 上传流程中可能出现的失败，按客户端错误和基础设施错误区分
#[derive(Debug)]
pub enum UploadError {
    /// 表单解析失败
    Parse(String),
    /// 未上传图片或文件大小为 0
    NoImage,
    /// 图片超过大小限制
    ImageTooLarge(u64),
    /// 缺少必填文本字段
    MissingField(&'static str),
    /// 暂存目录读写失败
    Io(std::io::Error),
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Io(e)
    }
}

/// 解析后的表单：图片字节和文本字段
pub struct UploadForm {
    pub image: Vec<u8>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// 取出必填文本字段，缺失时报验证错误
    pub fn take(&mut self, name: &'static str) -> Result<String, UploadError> {
        self.fields.remove(name).ok_or(UploadError::MissingField(name))
    }
}

/// 生成防冲突的最终文件名：毫秒时间戳前缀加原始文件名
pub fn final_file_name(original: &str) -> String {
    let original = if original.is_empty() { "image" } else { original };
    format!("{}_{}", chrono::Utc::now().timestamp_millis(), original)
}

/// 读取 multipart 表单：图片字段边读边落盘到暂存目录并检查大小，
/// 其余字段收集为文本。成功后把暂存文件改名为最终文件名并整体读回。
pub async fn read_upload_form(
    multipart: &mut Multipart,
    image_field: &'static str,
    upload_dir: &Path,
) -> Result<UploadForm, UploadError> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let mut fields = HashMap::new();
    let mut staged: Option<(PathBuf, String, u64)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(UploadError::Parse(e.to_string())),
        };

        let name = field.name().unwrap_or("").to_string();

        if name == image_field {
            // 只接受第一个图片字段
            if staged.is_some() {
                continue;
            }

            let original = field.file_name().unwrap_or("").to_string();
            let temp_path = upload_dir.join(format!("{}.part", uuid::Uuid::new_v4()));
            let mut file = tokio::fs::File::create(&temp_path).await?;
            let mut size: u64 = 0;

            let mut field = field;
            loop {
                let chunk = match field.chunk().await {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => break,
                    Err(e) => {
                        let _ = tokio::fs::remove_file(&temp_path).await;
                        return Err(UploadError::Parse(e.to_string()));
                    }
                };

                size += chunk.len() as u64;
                if size > MAX_IMAGE_BYTES {
                    drop(file);
                    let _ = tokio::fs::remove_file(&temp_path).await;
                    return Err(UploadError::ImageTooLarge(size));
                }
                file.write_all(&chunk).await?;
            }
            file.flush().await?;

            staged = Some((temp_path, original, size));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| UploadError::Parse(e.to_string()))?;
            fields.insert(name, value);
        }
    }

    let (temp_path, original, size) = match staged {
        Some(staged) => staged,
        None => return Err(UploadError::NoImage),
    };
    if size == 0 {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(UploadError::NoImage);
    }

    // 移动到最终位置后整体读回，数据库保存的是读回的内容
    let final_path = upload_dir.join(final_file_name(&original));
    tokio::fs::rename(&temp_path, &final_path).await?;
    let image = tokio::fs::read(&final_path).await?;

    Ok(UploadForm { image, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_name_keeps_original_suffix() {
        let name = final_file_name("cover.jpg");
        assert!(name.ends_with("_cover.jpg"));
        let (prefix, _) = name.split_once('_').unwrap();
        assert!(prefix.parse::<i64>().is_ok());
    }

    #[test]
    fn final_name_handles_missing_original() {
        let name = final_file_name("");
        assert!(name.ends_with("_image"));
    }

    #[test]
    fn take_reports_missing_field() {
        let mut form = UploadForm {
            image: vec![1],
            fields: HashMap::from([("coursename".to_string(), "物理入门".to_string())]),
        };
        assert_eq!(form.take("coursename").unwrap(), "物理入门");
        assert!(matches!(
            form.take("price"),
            Err(UploadError::MissingField("price"))
        ));
    }

    #[test]
    fn size_limit_matches_contract() {
        assert_eq!(MAX_IMAGE_BYTES, 5_000_000);
    }
}
