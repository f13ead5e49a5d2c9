use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::departments::requests::CreateDepartmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_department(
    service: &DepartmentService,
    req: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "部门名称不能为空",
        )));
    }

    // 指定的上级部门必须存在
    if let Some(parent_id) = req.parent_id {
        match storage.get_department_by_id(parent_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::DepartmentNotFound,
                    format!("上级部门不存在: {parent_id}"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("校验上级部门失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage.create_department(req).await {
        Ok(department) => {
            tracing::info!("Created department {}", department.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(department, "部门创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("创建部门失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::{http::StatusCode, test, web};
    use migration::{Migrator, MigratorTrait};
    use std::sync::Arc;

    async fn memory_storage() -> Arc<dyn Storage> {
        let mut opt = sea_orm::ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = sea_orm::Database::connect(opt)
            .await
            .expect("内存数据库连接失败");
        Migrator::up(&db, None).await.expect("迁移执行失败");
        Arc::new(SeaOrmStorage { db })
    }

    #[tokio::test]
    async fn test_create_with_missing_parent_returns_department_not_found() {
        let storage = memory_storage().await;
        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage))
            .to_http_request();
        let service = DepartmentService::new_lazy();

        let response = create_department(
            &service,
            CreateDepartmentRequest {
                name: "研发中心".to_string(),
                parent_id: Some(404),
            },
            &request,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::DepartmentNotFound as i32);
    }
}
