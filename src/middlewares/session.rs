use crate::error::AppError;
use crate::models::{User, UserRole};
use crate::store::SharedStore;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

/// 请求扩展里携带的当前登录身份
#[derive(Clone)]
pub struct CurrentUser(pub User);

// 公开路径配置
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    excluded_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            // 完全匹配的公开路径
            exact_paths: vec!["/swagger-ui", "/swagger-ui/", "/api-docs/openapi.json"],
            // 前缀匹配的公开路径
            prefix_paths: vec!["/swagger-ui/", "/api-docs/", "/api/v1/auth/"],
            // 需要排除的路径（即使在公开前缀下也需要会话）
            excluded_paths: vec!["/api/v1/auth/logout", "/api/v1/auth/me"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        // 首先检查是否在排除列表中
        if self
            .excluded_paths
            .iter()
            .any(|&excluded| path.starts_with(excluded))
        {
            return false;
        }

        // 检查完全匹配
        if self.exact_paths.contains(&path) {
            return true;
        }

        // 检查前缀匹配
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

/// 会话门：非公开路径要求有活动会话，并把当前用户注入请求扩展
pub struct SessionMiddleware {
    store: SharedStore,
}

impl SessionMiddleware {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            store: self.store.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    store: SharedStore,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // 检查是否为公开路径
        if self.public_paths.is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let store = self.store.clone();
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let current = store.session.read().await.clone();
            match current {
                Some(user) => {
                    req.extensions_mut().insert(CurrentUser(user));
                    service.call(req).await
                }
                None => Err(AppError::AuthError("No active session".to_string()).into()),
            }
        })
    }
}

/// handler 侧取当前用户
pub fn get_current_user(req: &HttpRequest) -> Option<User> {
    req.extensions().get::<CurrentUser>().map(|c| c.0.clone())
}

/// 会话存在性 + 角色标签相等性检查
pub fn require_role(req: &HttpRequest, role: UserRole) -> Result<User, AppError> {
    let user = get_current_user(req)
        .ok_or_else(|| AppError::AuthError("No active session".to_string()))?;
    if user.role != role {
        return Err(AppError::PermissionDenied);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        let paths = PublicPaths::new();
        assert!(paths.is_public_path("/api/v1/auth/login"));
        assert!(paths.is_public_path("/swagger-ui/"));
        assert!(paths.is_public_path("/api-docs/openapi.json"));
        assert!(!paths.is_public_path("/api/v1/auth/logout"));
        assert!(!paths.is_public_path("/api/v1/auth/me"));
        assert!(!paths.is_public_path("/api/v1/orders"));
    }
}
